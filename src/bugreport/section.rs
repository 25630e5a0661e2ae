use lazy_static::lazy_static;
use regex::Regex;

pub const DUMP_OF_SERVICE_USAGESTATS: &str = "DUMP OF SERVICE usagestats";

lazy_static! {
    pub static ref SECTION_BEGIN: Regex =
        Regex::new(r#"^------ (.*?)(?: \((.*)\)) ------$"#).unwrap();
    pub static ref SECTION_BEGIN_NO_CMD: Regex = Regex::new(r#"^------ ([^(]+) ------$"#).unwrap();
    pub static ref SECTION_END: Regex =
        Regex::new(r#"------ (\d+.\d+)s was the duration of '(.*?)(?: \(.*\))?' ------"#).unwrap();
    // DUMP OF SERVICE usagestats:
    pub static ref DUMPSYS_SERVICE: Regex = Regex::new(r#"^DUMP OF SERVICE (.+?):?$"#).unwrap();
    // --------- 0.012s was the duration of dumpsys usagestats, ending at: 2024-08-16 10:02:40
    pub static ref DUMPSYS_END: Regex =
        Regex::new(r#"^-{9} \d+\.\d+s was the duration of dumpsys (.*), ending at"#).unwrap();
    pub static ref SEPARATOR: Regex = Regex::new(r#"^-{20,}$"#).unwrap();
}

/// True for any line that closes a dumpsys service body.
pub fn is_section_boundary(line: &str) -> bool {
    DUMPSYS_END.is_match(line)
        || SEPARATOR.is_match(line)
        || DUMPSYS_SERVICE.is_match(line)
        || SECTION_END.is_match(line)
        || SECTION_BEGIN.is_match(line)
        || SECTION_BEGIN_NO_CMD.is_match(line)
}

/// Full section name of a `DUMP OF SERVICE <svc>:` header line.
pub fn service_section_name(line: &str) -> Option<String> {
    DUMPSYS_SERVICE
        .captures(line)
        .map(|caps| format!("DUMP OF SERVICE {}", &caps[1]))
}

/// One named block of a bugreport, body lines only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    start_line: usize,
    lines: Vec<String>,
}

impl Section {
    pub fn new(name: &str, start_line: usize, lines: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            start_line,
            lines,
        }
    }

    /// Wraps a whole text as a section, for dumps captured on their own.
    pub fn from_text(name: &str, text: &str) -> Self {
        Self::new(name, 0, text.lines().map(str::to_string).collect())
    }

    pub fn start_line(&self) -> usize {
        self.start_line
    }

    pub fn get_line_numbers(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, start: {}, lines: {}",
            self.name,
            self.start_line,
            self.lines.len()
        )
    }
}
