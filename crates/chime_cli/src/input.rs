//! Interactive input for the running clock.
//!
//! # Responsibility
//! - Own stdin on a producer thread and translate lines into event-loop
//!   commands; the loop thread never reads input directly.
//!
//! Line grammar while the clock runs:
//! - empty line          -> dismiss the current alert
//! - `q` / `quit`        -> stop
//! - `add H M S am|pm`   -> schedule a new alarm
//! - `del H:MM:SS AM`    -> delete the newest alarm with that time

use chime_core::{AlarmTime, Command, Meridiem};
use log::warn;
use std::io::BufRead;
use std::sync::mpsc::Sender;
use std::thread;

/// Spawns the stdin reader. The thread exits when stdin closes or the loop
/// side hangs up.
pub fn spawn_stdin_reader(tx: Sender<Command>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_line(&line) {
                Ok(command) => {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
                Err(message) => {
                    warn!("event=input_parse module=cli status=rejected error={message}");
                    eprintln!("{message}");
                }
            }
        }
    });
}

/// Parses one input line into a command.
fn parse_line(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Command::Ack);
    }

    let mut words = trimmed.split_whitespace();
    let verb = words.next().unwrap_or_default().to_ascii_lowercase();
    match verb.as_str() {
        "q" | "quit" => Ok(Command::Shutdown),
        "add" => {
            let rest: Vec<&str> = words.collect();
            let [hour, minute, second, period] = rest.as_slice() else {
                return Err("usage: add <hour 1-12> <minute> <second> <am|pm>".to_string());
            };
            let hour: u32 = hour.parse().map_err(|_| format!("bad hour `{hour}`"))?;
            let minute: u32 = minute.parse().map_err(|_| format!("bad minute `{minute}`"))?;
            let second: u32 = second.parse().map_err(|_| format!("bad second `{second}`"))?;
            let meridiem = Meridiem::parse(period).map_err(|err| err.to_string())?;
            let time =
                AlarmTime::from_parts(hour, minute, second, meridiem).map_err(|err| err.to_string())?;
            Ok(Command::Schedule(time))
        }
        "del" => {
            let rest: Vec<&str> = words.collect();
            let time = AlarmTime::parse(&rest.join(" ")).map_err(|err| err.to_string())?;
            Ok(Command::DeleteByTime(time))
        }
        other => Err(format!(
            "unknown command `{other}`; try add, del, q, or Enter to dismiss an alert"
        )),
    }
}
