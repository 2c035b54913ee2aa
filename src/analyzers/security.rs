//! Regex scan for common injection, traversal and credential patterns.
//!
//! The table is matched line by line. A line hitting several patterns, in the
//! same or different categories, yields one finding per pattern.

use super::{scan_files, LineAnalyzer};
use crate::core::SecurityFinding;
use crate::errors::AnalysisResults;
use crate::io::{split_source_lines, FileSet};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// A named issue category with its compiled patterns.
pub struct SecurityRule {
    pub issue_type: &'static str,
    pub patterns: Vec<Regex>,
}

const PATTERN_TABLE: &[(&str, &[&str])] = &[
    (
        "SQL Injection",
        &[
            r#"SELECT.*FROM.*WHERE.*=.*['"]\s*\+\s*['"]"#,
            r#"INSERT.*INTO.*VALUES.*['"]\s*\+\s*['"]"#,
            r#"UPDATE.*SET.*=.*['"]\s*\+\s*['"]"#,
            r#"DELETE.*FROM.*WHERE.*=.*['"]\s*\+\s*['"]"#,
        ],
    ),
    (
        "Command Injection",
        &[r"os\.system\(", r"subprocess\.call\(", r"exec\(", r"eval\("],
    ),
    (
        "Path Traversal",
        &[r"\.\./", r"\.\.\\", r"%2e%2e%2f", r"%252e%252e%252f"],
    ),
    (
        "Hardcoded Credentials",
        &[
            r#"password\s*=\s*['"][^'"]+['"]"#,
            r#"api_key\s*=\s*['"][^'"]+['"]"#,
            r#"secret\s*=\s*['"][^'"]+['"]"#,
        ],
    ),
];

pub static SECURITY_RULES: Lazy<Vec<SecurityRule>> = Lazy::new(|| {
    PATTERN_TABLE
        .iter()
        .map(|&(issue_type, patterns)| SecurityRule {
            issue_type,
            patterns: patterns
                .iter()
                .map(|p| Regex::new(p).expect("security pattern table is valid"))
                .collect(),
        })
        .collect()
});

pub struct SecurityAnalyzer;

impl LineAnalyzer for SecurityAnalyzer {
    type Output = SecurityFinding;

    fn name(&self) -> &'static str {
        "security"
    }

    fn analyze_content(&self, path: &Path, content: &str) -> Vec<SecurityFinding> {
        scan_security(path, content)
    }
}

pub fn analyze_security(files: &FileSet) -> AnalysisResults<SecurityFinding> {
    scan_files(&SecurityAnalyzer, files)
}

pub fn scan_security(path: &Path, content: &str) -> Vec<SecurityFinding> {
    let mut findings = Vec::new();

    for (index, line) in split_source_lines(content).into_iter().enumerate() {
        for rule in SECURITY_RULES.iter() {
            for pattern in rule.patterns.iter().filter(|p| p.is_match(line)) {
                findings.push(SecurityFinding {
                    file: path.to_path_buf(),
                    line: index + 1,
                    issue_type: rule.issue_type.to_string(),
                    pattern: pattern.as_str().to_string(),
                    code: line.trim().to_string(),
                });
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn issue_types(findings: &[SecurityFinding]) -> Vec<&str> {
        findings.iter().map(|f| f.issue_type.as_str()).collect()
    }

    #[test]
    fn test_hardcoded_password_flagged_on_its_line() {
        let source = "import os\npassword = \"hunter2\"\n";
        let findings = scan_security(Path::new("cfg.py"), source);
        assert_eq!(issue_types(&findings), vec!["Hardcoded Credentials"]);
        assert_eq!(findings[0].line, 2);
        assert_eq!(findings[0].code, "password = \"hunter2\"");
    }

    #[test]
    fn test_plain_select_is_not_sql_injection() {
        let findings = scan_security(Path::new("q.py"), "SELECT * FROM users\n");
        assert!(findings.is_empty());
    }

    #[test]
    fn test_concatenated_select_is_sql_injection() {
        let source = r#"q = "SELECT * FROM users WHERE id = '" + "x" + "'""#;
        let findings = scan_security(Path::new("q.py"), source);
        assert_eq!(issue_types(&findings), vec!["SQL Injection"]);
    }

    #[test]
    fn test_one_finding_per_matching_pattern() {
        // exec( and eval( both match, plus the traversal on the same line.
        let source = indoc! {r#"
            eval(exec("../etc/passwd"))
        "#};
        let findings = scan_security(Path::new("x.py"), source);
        assert_eq!(
            issue_types(&findings),
            vec!["Command Injection", "Command Injection", "Path Traversal"]
        );
        assert!(findings.iter().all(|f| f.line == 1));
    }

    #[test]
    fn test_windows_traversal_and_encoded_variants() {
        let source = "open('..\\\\secret')\nurl = '%2e%2e%2fetc'\n";
        let findings = scan_security(Path::new("t.py"), source);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].line, 1);
        assert_eq!(findings[1].line, 2);
    }

    #[test]
    fn test_rule_table_shape() {
        let names: Vec<_> = SECURITY_RULES.iter().map(|r| r.issue_type).collect();
        assert_eq!(
            names,
            vec![
                "SQL Injection",
                "Command Injection",
                "Path Traversal",
                "Hardcoded Credentials"
            ]
        );
        let total: usize = SECURITY_RULES.iter().map(|r| r.patterns.len()).sum();
        assert_eq!(total, 15);
    }
}
