/// A line typed at the form's command prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum FormCommand {
    List,
    /// Append a row; optional "CREDIT" or "CREDIT:GRADE"
    Add(Option<String>),
    /// 1-based row number
    Remove(usize),
    SetCredit(usize, String),
    SetGrade(usize, String),
    /// "CREDIT:GRADE"
    SetBundle(String),
    ClearBundle,
    ShowBundle,
    SetScheme(String),
    ShowGrades,
    Compute,
    Breakdown,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  list                      show the course list
  add [CREDIT[:GRADE]]      add a course (default grade preselected)
  rm N                      remove course N
  credit N VALUE            set the credit of course N
  grade N LABEL             set the grade of course N
  bundle CREDIT:GRADE       set previously earned credit
  bundle clear              remove the bundle
  scheme NAME               switch grading scheme
  grades                    list grades of the current scheme
  compute | c               show the CGPA
  breakdown | b             show how each row was counted
  help | ?                  show this help
  quit | q                  leave";

/// Parse a command line. Blank input yields `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<FormCommand>, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "list" | "ls" => FormCommand::List,
        "add" | "a" => FormCommand::Add(args.first().map(|s| s.to_string())),
        "rm" | "remove" | "del" => FormCommand::Remove(row_number(&args, 0)?),
        "credit" => FormCommand::SetCredit(row_number(&args, 0)?, required(&args, 1, "VALUE")?),
        "grade" => FormCommand::SetGrade(row_number(&args, 0)?, required(&args, 1, "LABEL")?),
        "bundle" => match args.first() {
            None => FormCommand::ShowBundle,
            Some(arg) if arg.eq_ignore_ascii_case("clear") => FormCommand::ClearBundle,
            Some(arg) => FormCommand::SetBundle(arg.to_string()),
        },
        "scheme" => {
            if args.is_empty() {
                FormCommand::ShowGrades
            } else {
                // Scheme labels may contain spaces when typed loosely
                FormCommand::SetScheme(args.join(" "))
            }
        }
        "grades" => FormCommand::ShowGrades,
        "compute" | "c" => FormCommand::Compute,
        "breakdown" | "b" => FormCommand::Breakdown,
        "help" | "?" | "h" => FormCommand::Help,
        "quit" | "q" | "exit" => FormCommand::Quit,
        other => return Err(format!("Unknown command '{}'. Type 'help' for a list.", other)),
    };
    Ok(Some(command))
}

fn row_number(args: &[&str], pos: usize) -> Result<usize, String> {
    let raw = args.get(pos).ok_or_else(|| "Missing course number N".to_string())?;
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("Invalid course number '{}'", raw)),
    }
}

fn required(args: &[&str], pos: usize, name: &str) -> Result<String, String> {
    args.get(pos)
        .map(|s| s.to_string())
        .ok_or_else(|| format!("Missing {}", name))
}
