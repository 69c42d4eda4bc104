//! Interactive demo: a tiny echo shell on top of the console engine.
//!
//! Type lines and they are echoed back through the asynchronous write
//! path; a background ticker prints over the edit line every few
//! seconds to show that in-progress input survives. `history` lists
//! recalled lines (arrow up/down navigates them), `exit` quits.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use termline::Console;

fn main() -> Result<()> {
    let console = Console::new("> ")?;
    console.write("termline demo. type 'exit' to quit, 'history' to list history.");

    let mut ticks = 0u32;
    loop {
        while console.has_command() {
            let line = console.get_command()?;
            match line.as_str() {
                "exit" => return Ok(()),
                "history" => {
                    for entry in console.history() {
                        console.write(&format!("  {entry}"));
                    }
                }
                "" => {}
                _ => console.write(&format!("you typed: {line}")),
            }
        }

        thread::sleep(Duration::from_millis(100));
        ticks += 1;
        if ticks % 50 == 0 {
            console.write(&format!("[tick {}] async output does not eat your line", ticks / 50));
        }
    }
}
