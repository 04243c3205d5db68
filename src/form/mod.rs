//! Interactive prompt form: pick a scheme, bulk-enter courses, then edit rows
//! and compute until the user quits.

pub mod command;

pub use command::{parse_command, FormCommand, HELP};

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::cgpa::{BundleEntry, CourseEntry};
use crate::output;
use crate::scheme::{list_grades, list_scheme_ids, SchemeId};
use crate::session::{default_batches, CourseBatch, CourseField, Session};

/// Whether the command loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Form<R, W> {
    input: R,
    output: W,
    use_colors: bool,
}

impl<R: BufRead, W: Write> Form<R, W> {
    pub fn new(input: R, output: W, use_colors: bool) -> Self {
        Self {
            input,
            output,
            use_colors,
        }
    }

    /// Read one line. `None` on end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            Ok(None)
        } else {
            Ok(Some(line.trim().to_string()))
        }
    }

    /// Prompt user with a message and return their trimmed input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush output")?;
        self.read_line()
    }

    /// Prompt with a default value. Returns default if input is empty or closed.
    fn prompt_with_default(&mut self, message: &str, default: &str) -> Result<String> {
        match self.prompt(&format!("{} [{}]: ", message, default))? {
            Some(input) if !input.is_empty() => Ok(input),
            _ => Ok(default.to_string()),
        }
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).context("Failed to write output")
    }

    /// Run the whole form: setup, then the command loop.
    pub fn run(&mut self, default_scheme: SchemeId, batch_credits: &[f64]) -> Result<Session> {
        self.say("CGPA Calculator")?;
        self.say("===============")?;
        self.say("")?;

        let scheme = self.choose_scheme(default_scheme)?;
        let mut session = Session::new(scheme);

        self.say("")?;
        self.say("How many courses of each credit value? (COUNT or COUNT:CREDIT, blank for none)")?;
        let mut batches = Vec::new();
        for preset in default_batches(batch_credits) {
            let answer = self.prompt_with_default(&format!("  Courses worth {} credits", preset.credit), "0")?;
            batches.push(parse_batch_answer(&answer, &preset.credit));
        }
        session.initialize(&batches);

        self.say("")?;
        self.say(&output::format_course_list(session.courses(), self.use_colors))?;
        self.say("Type 'help' for commands.")?;

        loop {
            let Some(line) = self.prompt("> ")? else {
                break;
            };
            match parse_command(&line) {
                Ok(Some(cmd)) => {
                    if self.apply(&mut session, cmd)? == Flow::Quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(msg) => self.say(&format!("  {}", msg))?,
            }
        }

        Ok(session)
    }

    fn choose_scheme(&mut self, default: SchemeId) -> Result<SchemeId> {
        self.say("Grading schemes:")?;
        for (i, id) in list_scheme_ids().iter().enumerate() {
            self.say(&format!("  {}. {}", i + 1, id))?;
        }
        loop {
            let input = self.prompt_with_default("Grading scheme", default.label())?;
            match resolve_scheme_choice(&input) {
                Ok(id) => return Ok(id),
                Err(e) => self.say(&format!("  Invalid: {}. Try again.", e))?,
            }
        }
    }

    /// Apply one command to the session and report back.
    pub fn apply(&mut self, session: &mut Session, cmd: FormCommand) -> Result<Flow> {
        match cmd {
            FormCommand::List => {
                self.say(&output::format_course_list(session.courses(), self.use_colors))?;
            }
            FormCommand::Add(None) => {
                let n = session.add_course();
                self.say(&format!("  Added course {}", n))?;
            }
            FormCommand::Add(Some(pair)) => {
                let mut entry = CourseEntry::from_pair(&pair);
                if entry.grade.is_empty() {
                    entry.grade = session.scheme().scheme().default_grade().to_string();
                }
                if self.check_grade(session.scheme(), &entry.grade)? {
                    let n = session.push_course(entry);
                    self.say(&format!("  Added course {}", n))?;
                }
            }
            FormCommand::Remove(n) => match session.remove_course(n.wrapping_sub(1)) {
                Ok(_) => self.say(&format!("  Removed course {}", n))?,
                Err(e) => self.say(&format!("  {}", e))?,
            },
            FormCommand::SetCredit(n, value) => {
                if let Err(e) = session.update_course(n.wrapping_sub(1), CourseField::Credit, value) {
                    self.say(&format!("  {}", e))?;
                }
            }
            FormCommand::SetGrade(n, label) => {
                if self.check_grade(session.scheme(), &label)? {
                    if let Err(e) = session.update_course(n.wrapping_sub(1), CourseField::Grade, label) {
                        self.say(&format!("  {}", e))?;
                    }
                }
            }
            FormCommand::SetBundle(pair) => {
                let bundle = BundleEntry::from_pair(&pair);
                if self.check_grade(session.scheme(), &bundle.grade)? {
                    session.set_bundle(bundle);
                }
            }
            FormCommand::ClearBundle => {
                session.clear_bundle();
                self.say("  Bundle cleared")?;
            }
            FormCommand::ShowBundle => {
                let text = match session.bundle() {
                    Some(b) => format!("  Bundle: {} credits of {}", b.credit, b.grade),
                    None => "  No bundle set".to_string(),
                };
                self.say(&text)?;
            }
            FormCommand::SetScheme(name) => match name.parse::<SchemeId>() {
                Ok(id) => {
                    let grades = session.select_scheme(id);
                    self.say(&format!("  Scheme {}: {}", id, grades.join(" ")))?;
                }
                Err(e) => self.say(&format!("  {}", e))?,
            },
            FormCommand::ShowGrades => {
                let scheme = session.scheme();
                self.say(&format!("  Scheme {}", scheme))?;
                self.say(&output::format_grades(scheme))?;
            }
            FormCommand::Compute => {
                let result = session.compute();
                self.say(&output::format_result(&result, self.use_colors))?;
            }
            FormCommand::Breakdown => {
                let result = session.compute();
                self.say(&output::format_breakdown(&result, self.use_colors))?;
                self.say(&output::format_result(&result, self.use_colors))?;
            }
            FormCommand::Help => self.say(HELP)?,
            FormCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Grade pickers only offer the scheme's labels; reject anything else here.
    fn check_grade(&mut self, scheme: SchemeId, grade: &str) -> Result<bool> {
        if scheme.scheme().contains(grade) {
            Ok(true)
        } else {
            self.say(&format!(
                "  '{}' is not a {} grade. Choose one of: {}",
                grade,
                scheme,
                list_grades(scheme).join(" ")
            ))?;
            Ok(false)
        }
    }
}

/// `COUNT` keeps the preset credit; `COUNT:CREDIT` replaces it.
pub fn parse_batch_answer(answer: &str, preset_credit: &str) -> CourseBatch {
    match answer.split_once(':') {
        Some((count, credit)) if !credit.trim().is_empty() => CourseBatch::new(count.trim(), credit.trim()),
        Some((count, _)) => CourseBatch::new(count.trim(), preset_credit),
        None => CourseBatch::new(answer, preset_credit),
    }
}

/// Accept either a 1-based menu number or a scheme name.
pub fn resolve_scheme_choice(input: &str) -> Result<SchemeId, String> {
    let ids = list_scheme_ids();
    if let Ok(n) = input.trim().parse::<usize>() {
        return ids
            .get(n.wrapping_sub(1))
            .copied()
            .ok_or_else(|| format!("choose 1 to {}", ids.len()));
    }
    input.parse::<SchemeId>().map_err(|e| e.to_string())
}
