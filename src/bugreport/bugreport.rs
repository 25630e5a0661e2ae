use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use zip::ZipArchive;

use super::section::{is_section_boundary, service_section_name, Section};
use crate::error::{Error, Result};

// tried in order against the archive entry names
const TEXT_ENTRY_PATTERNS: [&str; 2] = ["bugreport*.txt", "*.txt"];

/// A bugreport loaded into memory.
#[derive(Debug)]
pub struct Bugreport {
    path: Option<PathBuf>,
    lines: Vec<String>,
}

impl Bugreport {
    /// Opens a plain-text bugreport or a bugreport zip.
    pub fn open(path: &Path) -> Result<Self> {
        let is_zip = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("zip"))
            .unwrap_or(false);
        let text = if is_zip {
            Self::read_zip(path)?
        } else {
            let bytes = fs::read(path)?;
            String::from_utf8_lossy(&bytes).into_owned()
        };
        log::info!("Loaded bugreport: {}", path.display());

        let mut bugreport = Self::from_text(&text);
        bugreport.path = Some(path.to_path_buf());
        Ok(bugreport)
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            path: None,
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    fn read_zip(path: &Path) -> Result<String> {
        let mut archive = ZipArchive::new(File::open(path)?)?;
        let names: Vec<String> = archive.file_names().map(str::to_string).collect();

        for pattern in TEXT_ENTRY_PATTERNS {
            let pattern = Pattern::new(pattern)?;
            let found = names.iter().find(|name| {
                // entries may sit in a folder inside the archive
                let base = name.rsplit('/').next().unwrap_or(name);
                pattern.matches(base)
            });
            if let Some(name) = found {
                log::debug!("Reading zip entry: {}", name);
                let mut entry = archive.by_name(name)?;
                let mut bytes = Vec::new();
                entry.read_to_end(&mut bytes)?;
                return Ok(String::from_utf8_lossy(&bytes).into_owned());
            }
        }

        Err(Error::NoBugreportEntry(path.display().to_string()))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Names of all dumpsys service sections, in file order.
    pub fn section_names(&self) -> Vec<String> {
        self.lines
            .iter()
            .filter_map(|line| service_section_name(line))
            .collect()
    }

    /// Locates the first dumpsys service section called `name`.
    pub fn find_section(&self, name: &str) -> Option<Section> {
        let start = self
            .lines
            .iter()
            .position(|line| service_section_name(line).as_deref() == Some(name))?;

        let body: Vec<String> = self.lines[start + 1..]
            .iter()
            .take_while(|line| !is_section_boundary(line))
            .cloned()
            .collect();
        log::debug!("Found section {} at line {} ({} lines)", name, start + 1, body.len());
        Some(Section::new(name, start + 1, body))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Write;

    use super::*;
    use crate::bugreport::section::DUMP_OF_SERVICE_USAGESTATS;

    pub(crate) const EXAMPLE: &str = "\
== dumpstate: 2024-08-16 10:02:11
------ DUMPSYS (/system/bin/dumpsys) ------
-------------------------------------------------------------------------------
DUMP OF SERVICE activity:
  ACTIVITY MANAGER
--------- 0.020s was the duration of dumpsys activity, ending at: 2024-08-16 10:02:30
-------------------------------------------------------------------------------
DUMP OF SERVICE usagestats:
Date: 20240816
  com.foo: 2 times, 5000 ms
    com.foo.Main: 2 starts, 250-500ms=2
--------- 0.012s was the duration of dumpsys usagestats, ending at: 2024-08-16 10:02:40
-------------------------------------------------------------------------------
DUMP OF SERVICE wifi:
  Wi-Fi is enabled
";

    #[test]
    fn test_find_section() {
        let bugreport = Bugreport::from_text(EXAMPLE);
        let section = bugreport.find_section(DUMP_OF_SERVICE_USAGESTATS).unwrap();
        assert_eq!(
            section.lines().collect::<Vec<_>>(),
            vec![
                "Date: 20240816",
                "  com.foo: 2 times, 5000 ms",
                "    com.foo.Main: 2 starts, 250-500ms=2",
            ]
        );
        assert_eq!(section.start_line(), 8);
    }

    #[test]
    fn test_last_section_runs_to_eof() {
        let bugreport = Bugreport::from_text(EXAMPLE);
        let section = bugreport.find_section("DUMP OF SERVICE wifi").unwrap();
        assert_eq!(section.get_line_numbers(), 1);
    }

    #[test]
    fn test_missing_section() {
        let bugreport = Bugreport::from_text(EXAMPLE);
        assert!(bugreport.find_section("DUMP OF SERVICE alarm").is_none());
        assert_eq!(
            bugreport.section_names(),
            vec![
                "DUMP OF SERVICE activity",
                "DUMP OF SERVICE usagestats",
                "DUMP OF SERVICE wifi"
            ]
        );
    }

    #[test]
    fn test_open_zip() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("bugreport.zip");
        {
            let file = File::create(&zip_path).unwrap();
            let mut zip = zip::ZipWriter::new(file);
            let options = zip::write::SimpleFileOptions::default();
            zip.start_file("version.txt", options).unwrap();
            zip.write_all(b"1.0").unwrap();
            zip.start_file("bugreport-haotian-2024-08-16.txt", options)
                .unwrap();
            zip.write_all(EXAMPLE.as_bytes()).unwrap();
            zip.finish().unwrap();
        }

        let bugreport = Bugreport::open(&zip_path).unwrap();
        assert_eq!(bugreport.path(), Some(zip_path.as_path()));
        assert!(bugreport.find_section(DUMP_OF_SERVICE_USAGESTATS).is_some());
    }

    #[test]
    fn test_open_zip_without_text() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("empty.zip");
        {
            let file = File::create(&zip_path).unwrap();
            let mut zip = zip::ZipWriter::new(file);
            zip.start_file("data.bin", zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.write_all(&[0, 1, 2]).unwrap();
            zip.finish().unwrap();
        }
        assert!(matches!(
            Bugreport::open(&zip_path),
            Err(Error::NoBugreportEntry(_))
        ));
    }

    #[test]
    fn test_open_missing_file() {
        assert!(matches!(
            Bugreport::open(Path::new("does/not/exist.txt")),
            Err(Error::Io(_))
        ));
    }
}
