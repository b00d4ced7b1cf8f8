//! Interactive work session.
//!
//! Drives the core with a one-second tick loop and relays stdin input as
//! commands. The loop is cooperatively cancelled: quit requests and ctrl-c
//! are observed at the cycle boundary, never mid-tick.

use std::io::Write as _;
use std::time::Duration;

use clap::Args;
use discipline_core::{AppSession, Command, Config, Database, Event};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info};

#[derive(Args)]
pub struct RunArgs {
    /// Daily hour goal for this run (one of 3, 5, 8, 10, 12)
    #[arg(long)]
    target: Option<u32>,
    /// Focus label for this run
    #[arg(long)]
    focus: Option<String>,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_session(args))
}

async fn run_session(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let mut session = AppSession::new(db, &config);

    if config.timer.persist_session && session.restore_saved_timer()? {
        info!(
            elapsed = session.timer().elapsed_seconds(),
            "restored previous session"
        );
    }
    if let Some(hours) = args.target {
        if session.handle(Command::SetTarget(hours))?.is_empty() {
            return Err(format!("invalid goal: {hours} (allowed: 3, 5, 8, 10, 12)").into());
        }
    }
    if let Some(focus) = args.focus {
        session.handle(Command::SetFocus(focus))?;
    }

    for event in session.handle(Command::Toggle)? {
        if let Event::SessionStarted { focus, quote, .. } = event {
            println!("focus: {focus}");
            println!("\"{quote}\"");
            println!("(t pauses/resumes, q quits, help lists commands)");
        }
    }

    // First tick one full second after start.
    let mut interval = tokio::time::interval_at(
        tokio::time::Instant::now() + Duration::from_secs(1),
        Duration::from_secs(1),
    );
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut awaiting_checkin = false;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                for event in session.handle(Command::Tick)? {
                    if matches!(event, Event::CheckinDue { .. }) {
                        awaiting_checkin = true;
                        println!();
                        println!(
                            "check-in at {}: are you investing your time right now?",
                            session.timer().display()
                        );
                        println!("answer y or n, optionally followed by a note");
                    }
                }
                if !awaiting_checkin {
                    render(&session);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim();
                if awaiting_checkin {
                    match parse_answer(input) {
                        Some(answer) => {
                            // A failed write loses this entry only; the
                            // session keeps running either way.
                            if let Err(e) = session.handle(answer) {
                                error!(%e, "failed to record check-in");
                            }
                            awaiting_checkin = false;
                        }
                        None if input == "q" || input == "quit" => break,
                        None => {
                            println!("answer y or n (optionally followed by a note), or q to stop")
                        }
                    }
                } else if !handle_command_line(&mut session, input)? {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupt received, stopping at the cycle boundary");
                break;
            }
        }
    }

    println!();
    if session.timer().is_working() {
        for event in session.handle(Command::Toggle)? {
            if let Event::SessionStopped {
                abandoned_checkin: true,
                ..
            } = event
            {
                debug!("unanswered check-in dropped");
            }
        }
    }
    if config.timer.persist_session {
        session.save_timer()?;
    }
    println!(
        "worked {} toward a {}h goal",
        session.timer().display(),
        session.timer().daily_target_hours()
    );
    Ok(())
}

fn render(session: &AppSession) {
    let timer = session.timer();
    let paused = if timer.is_working() { "" } else { " (paused)" };
    print!(
        "\r{} | {:>3.0}% of {}h | {}{}   ",
        timer.display(),
        timer.progress() * 100.0,
        timer.daily_target_hours(),
        timer.focus(),
        paused
    );
    let _ = std::io::stdout().flush();
}

fn parse_answer(input: &str) -> Option<Command> {
    let (head, note) = split_first_word(input);
    let note = (!note.is_empty()).then(|| note.to_string());
    match head {
        "y" | "yes" => Some(Command::AnswerYes(note)),
        "n" | "no" => Some(Command::AnswerNo(note)),
        _ => None,
    }
}

/// Returns false when the user asked to quit.
fn handle_command_line(
    session: &mut AppSession,
    input: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    let (head, rest) = split_first_word(input);
    match head {
        "" => {}
        "q" | "quit" => return Ok(false),
        "t" | "toggle" => {
            for event in session.handle(Command::Toggle)? {
                match event {
                    Event::SessionStarted { quote, .. } => println!("resumed - \"{quote}\""),
                    Event::SessionStopped { .. } => {
                        println!("paused at {}", session.timer().display())
                    }
                    _ => {}
                }
            }
        }
        "focus" => {
            session.handle(Command::SetFocus(rest.to_string()))?;
            println!("focus: {rest}");
        }
        "task" => handle_task_line(session, rest)?,
        "tasks" => print_tasks(session),
        "help" => print_help(),
        _ => println!("unknown command; help lists commands"),
    }
    Ok(true)
}

fn handle_task_line(
    session: &mut AppSession,
    rest: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (sub, arg) = split_first_word(rest);
    match sub {
        "add" => {
            if session
                .handle(Command::AddTask(arg.to_string()))?
                .is_empty()
            {
                println!("task text must be non-empty");
            }
        }
        "done" | "rm" | "focus" => match arg.parse::<usize>() {
            Ok(n) if n >= 1 => {
                let index = n - 1;
                let command = match sub {
                    "done" => Command::SetTaskDone(index, true),
                    "rm" => Command::RemoveTask(index),
                    _ => Command::FocusTask(index),
                };
                if session.handle(command)?.is_empty() {
                    println!("no task #{n}");
                } else if sub == "focus" {
                    println!("focus: {}", session.timer().focus());
                }
            }
            _ => println!("usage: task {sub} <number>"),
        },
        _ => println!("usage: task add <text> | task done <n> | task rm <n> | task focus <n>"),
    }
    Ok(())
}

fn print_tasks(session: &AppSession) {
    if session.tasks().is_empty() {
        println!("no tasks");
        return;
    }
    for (i, task) in session.tasks().iter().enumerate() {
        let mark = if task.done { "x" } else { " " };
        println!("{:>3}. [{mark}] {}", i + 1, task.text);
    }
}

fn print_help() {
    println!("t              pause or resume the session");
    println!("focus <label>  set the current focus");
    println!("task add <text>");
    println!("task done <n>  check a task off");
    println!("task rm <n>    delete a task");
    println!("task focus <n> make a task the current focus");
    println!("tasks          list tasks");
    println!("q              stop and quit");
}

fn split_first_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (input, ""),
    }
}
