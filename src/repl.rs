use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::diagnostics::Severity;
use crate::usagestats::UsageRecord;
use crate::utils::time_utils::format_ts;

const HELP: &str = "\
list              all records
show <pkg>        actions of a package
date <label>      records of one date
top <n>           n records with the longest usage time
diag              parser diagnostics
exit              quit";

pub struct ReplState<'a> {
    records: &'a [UsageRecord],
    diagnostics: &'a [(Severity, String)],
}

impl<'a> ReplState<'a> {
    pub fn new(records: &'a [UsageRecord], diagnostics: &'a [(Severity, String)]) -> Self {
        Self {
            records,
            diagnostics,
        }
    }
}

pub fn repl(state: &ReplState<'_>) -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;
    println!("{} records loaded, type 'help' for commands", state.records.len());

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                let input = line.trim();
                if input == "exit" || input == "quit" {
                    println!("Goodbye!");
                    break;
                }
                if input.is_empty() {
                    continue;
                }
                println!("{}", evaluate_input(input, state));
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn summary_line(record: &UsageRecord) -> String {
    format!(
        "[{}] {} {} times, {} ({} actions) {}",
        record.anchor,
        record.package,
        record.launch_count,
        format_ts(record.usage_time_ms),
        record.actions.len(),
        record.date
    )
}

fn join_or(lines: Vec<String>, empty: &str) -> String {
    if lines.is_empty() {
        empty.to_string()
    } else {
        lines.join("\n")
    }
}

pub fn evaluate_input(input: &str, state: &ReplState<'_>) -> String {
    let parts: Vec<&str> = input.split_whitespace().collect();
    match parts.as_slice() {
        ["help"] => HELP.to_string(),
        ["list"] => join_or(
            state.records.iter().map(summary_line).collect(),
            "No records.",
        ),
        ["show", pkg] => {
            let mut out = Vec::new();
            for record in state.records.iter().filter(|r| r.package == *pkg) {
                out.push(summary_line(record));
                for action in &record.actions {
                    out.push(format!(
                        "    {}: {} starts, {}",
                        action.action, action.starts, action.count
                    ));
                }
            }
            join_or(out, &format!("No records for {}.", pkg))
        }
        ["date", label] => join_or(
            state
                .records
                .iter()
                .filter(|r| r.date == *label)
                .map(summary_line)
                .collect(),
            &format!("No records for date {}.", label),
        ),
        ["top", n] => match n.parse::<usize>() {
            Ok(n) => {
                let mut sorted: Vec<&UsageRecord> = state.records.iter().collect();
                sorted.sort_by(|a, b| b.usage_time_ms.cmp(&a.usage_time_ms));
                join_or(
                    sorted.into_iter().take(n).map(summary_line).collect(),
                    "No records.",
                )
            }
            Err(_) => "Invalid top command. Usage: top <n>".to_string(),
        },
        ["diag"] => join_or(
            state
                .diagnostics
                .iter()
                .map(|(level, msg)| format!("[{}] {}", level, msg))
                .collect(),
            "No diagnostics.",
        ),
        _ => format!("Unknown command: {}. Type 'help' for commands.", input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingDiagnostics;
    use crate::usagestats::parse_usage_stats;

    const DUMP: &str = "\
Date: 20240816
  com.foo: 2 times, 5000 ms
    com.foo.Main: 2 starts, 250-500ms=2
  com.bar: 1 times, 120000 ms
    ???
Date: 20240817
  com.baz: 4 times, 10 ms
";

    fn with_state<F: FnOnce(&ReplState<'_>)>(f: F) {
        let mut diag = CollectingDiagnostics::new();
        let records = parse_usage_stats(DUMP.lines(), &mut diag);
        let state = ReplState::new(&records, &diag.messages);
        f(&state);
    }

    #[test]
    fn test_list_and_top() {
        with_state(|state| {
            assert_eq!(evaluate_input("list", state).lines().count(), 3);
            let top = evaluate_input("top 1", state);
            assert_eq!(top, "[a1] com.bar: 1 times, 2m (0 actions) 20240816");
            assert!(evaluate_input("top x", state).starts_with("Invalid top command"));
        });
    }

    #[test]
    fn test_show_and_date() {
        with_state(|state| {
            let show = evaluate_input("show com.foo:", state);
            assert!(show.contains("com.foo.Main: 2 starts, 250-500ms=2"));
            assert_eq!(evaluate_input("show nope", state), "No records for nope.");

            let date = evaluate_input("date 20240817", state);
            assert!(date.contains("com.baz"));
            assert!(!date.contains("com.foo"));
        });
    }

    #[test]
    fn test_diag_and_unknown() {
        with_state(|state| {
            assert!(evaluate_input("diag", state).contains("Cannot parse action stat: ???"));
            assert!(evaluate_input("frobnicate", state).starts_with("Unknown command"));
        });
    }
}
