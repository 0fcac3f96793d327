// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Record scanner using SIMD-accelerated byte search
//!
//! Finds `#id=TYPE(...);` spans in the DATA section without decoding them.

use memchr::memchr;

/// Location of one record in the file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordSpan<'a> {
    pub id: u32,
    pub type_name: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Iterator over the records of a STEP file
pub struct EntityScanner<'a> {
    content: &'a str,
    pos: usize,
}

impl<'a> EntityScanner<'a> {
    /// Start scanning after the `DATA;` marker (or at the top if there is none)
    pub fn new(content: &'a str) -> Self {
        let pos = content.find("DATA;").map(|p| p + 5).unwrap_or(0);
        Self { content, pos }
    }

    fn skip_blanks(&mut self) {
        let bytes = self.content.as_bytes();
        while self.pos < bytes.len() && (bytes[self.pos] == b' ' || bytes[self.pos] == b'\t') {
            self.pos += 1;
        }
    }

    /// Advance past the terminating `;`, ignoring semicolons inside strings
    fn find_record_end(&mut self) -> Option<usize> {
        let bytes = self.content.as_bytes();
        let mut in_string = false;

        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'\'' => {
                    if in_string && bytes.get(self.pos + 1) == Some(&b'\'') {
                        self.pos += 2;
                        continue;
                    }
                    in_string = !in_string;
                }
                b';' if !in_string => {
                    self.pos += 1;
                    return Some(self.pos);
                }
                _ => {}
            }
            self.pos += 1;
        }

        None
    }
}

impl<'a> Iterator for EntityScanner<'a> {
    type Item = RecordSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.content.as_bytes();

        while self.pos < bytes.len() {
            let offset = memchr(b'#', &bytes[self.pos..])?;
            self.pos += offset;

            // References inside attribute lists are not record starts
            let before = self.content[..self.pos].trim_end_matches([' ', '\t']);
            let at_record_start = before.is_empty() || before.ends_with(['\n', '\r', ';']);
            if !at_record_start {
                self.pos += 1;
                continue;
            }

            let start = self.pos;
            self.pos += 1;
            let id_start = self.pos;
            while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
                self.pos += 1;
            }
            if self.pos == id_start {
                continue;
            }
            let Some(id) = lexical_core::parse::<u32>(&bytes[id_start..self.pos]).ok() else {
                continue;
            };

            self.skip_blanks();
            if bytes.get(self.pos) != Some(&b'=') {
                continue;
            }
            self.pos += 1;
            self.skip_blanks();

            let type_start = self.pos;
            while self.pos < bytes.len()
                && (bytes[self.pos].is_ascii_alphanumeric() || bytes[self.pos] == b'_')
            {
                self.pos += 1;
            }
            if self.pos == type_start {
                continue;
            }
            let type_name = &self.content[type_start..self.pos];

            let end = self.find_record_end()?;
            return Some(RecordSpan {
                id,
                type_name,
                start,
                end,
            });
        }

        None
    }
}

/// Schema identifier from the `FILE_SCHEMA` header entry, e.g. `IFC4`
pub fn schema_version(content: &str) -> Option<String> {
    let header_end = content.find("DATA;").unwrap_or(content.len());
    let header = &content[..header_end];
    let after = &header[header.find("FILE_SCHEMA")?..];
    let open = after.find('\'')? + 1;
    let close = after[open..].find('\'')? + open;
    Some(after[open..close].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_IFC: &str = "ISO-10303-21;
HEADER;
FILE_DESCRIPTION(('ViewDefinition [CoordinationView]'),'2;1');
FILE_NAME('test.ifc','2024-01-01T00:00:00',('Author'),('Org'),'Preprocessor','App','');
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCPROJECT('guid',$,'Project; phase 1',$,$,$,$,$,#2);
#2=IFCUNITASSIGNMENT((#3));
#3 = IFCSIUNIT(*,.LENGTHUNIT.,.MILLI.,.METRE.);
  #4=IFCWALL('guid',$,'Wall ''A''',$,$,#5,#6,$);
ENDSEC;
END-ISO-10303-21;
";

    #[test]
    fn test_scanner_finds_records() {
        let records: Vec<(u32, &str)> = EntityScanner::new(TEST_IFC)
            .map(|r| (r.id, r.type_name))
            .collect();
        assert_eq!(
            records,
            vec![
                (1, "IFCPROJECT"),
                (2, "IFCUNITASSIGNMENT"),
                (3, "IFCSIUNIT"),
                (4, "IFCWALL"),
            ]
        );
    }

    #[test]
    fn test_spans_cover_whole_record() {
        let first = EntityScanner::new(TEST_IFC).next().unwrap();
        let text = &TEST_IFC[first.start..first.end];
        assert!(text.starts_with("#1=IFCPROJECT("));
        assert!(text.ends_with("#2);"));
    }

    #[test]
    fn test_schema_version() {
        assert_eq!(schema_version(TEST_IFC).as_deref(), Some("IFC4"));
        assert_eq!(schema_version("DATA;"), None);
    }
}
