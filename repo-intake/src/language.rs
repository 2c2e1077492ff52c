//! Language registry and extension-based classification.
//!
//! The registry is a static table searched in declaration order; the first
//! entry whose extension set contains the file's extension wins. Some
//! extensions are declared by more than one entry (`.h` belongs to both C and
//! C++), so the order of [`LANGUAGES`] is part of the contract.

use serde::Serialize;

/// A reviewable language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    /// Stable tag sent to the model and stored in requests (`"python"`).
    pub value: &'static str,
    /// Human-readable name (`"Python"`).
    pub label: &'static str,
    /// Extensions including the leading dot, lowercase.
    pub extensions: &'static [&'static str],
}

pub static LANGUAGES: &[Language] = &[
    Language {
        value: "javascript",
        label: "JavaScript",
        extensions: &[".js", ".jsx", ".mjs", ".cjs"],
    },
    Language {
        value: "typescript",
        label: "TypeScript",
        extensions: &[".ts", ".tsx"],
    },
    Language {
        value: "python",
        label: "Python",
        extensions: &[".py"],
    },
    Language {
        value: "java",
        label: "Java",
        extensions: &[".java"],
    },
    Language {
        value: "c",
        label: "C",
        extensions: &[".c", ".h"],
    },
    Language {
        value: "cpp",
        label: "C++",
        extensions: &[".cpp", ".cc", ".cxx", ".hpp", ".h"],
    },
    Language {
        value: "csharp",
        label: "C#",
        extensions: &[".cs"],
    },
    Language {
        value: "go",
        label: "Go",
        extensions: &[".go"],
    },
    Language {
        value: "rust",
        label: "Rust",
        extensions: &[".rs"],
    },
    Language {
        value: "ruby",
        label: "Ruby",
        extensions: &[".rb"],
    },
    Language {
        value: "php",
        label: "PHP",
        extensions: &[".php"],
    },
    Language {
        value: "swift",
        label: "Swift",
        extensions: &[".swift"],
    },
    Language {
        value: "kotlin",
        label: "Kotlin",
        extensions: &[".kt", ".kts"],
    },
    Language {
        value: "dart",
        label: "Dart",
        extensions: &[".dart"],
    },
    Language {
        value: "html",
        label: "HTML",
        extensions: &[".html", ".htm"],
    },
    Language {
        value: "css",
        label: "CSS",
        extensions: &[".css", ".scss"],
    },
    Language {
        value: "sql",
        label: "SQL",
        extensions: &[".sql"],
    },
    Language {
        value: "shell",
        label: "Shell",
        extensions: &[".sh", ".bash"],
    },
];

/// Classifies a file name (or slash-separated path) by its extension.
///
/// Returns `None` when the name has no `.` or the extension is not registered.
pub fn classify(file_name: &str) -> Option<&'static Language> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext = format!(".{}", ext.to_lowercase());
    LANGUAGES.iter().find(|l| l.extensions.contains(&ext.as_str()))
}

/// Looks up a language by its tag, case-insensitively.
pub fn find_by_value(value: &str) -> Option<&'static Language> {
    LANGUAGES
        .iter()
        .find(|l| l.value.eq_ignore_ascii_case(value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_extension_classifies_to_a_declaring_language() {
        for lang in LANGUAGES {
            for ext in lang.extensions {
                let hit = classify(&format!("file{ext}")).unwrap();
                assert!(hit.extensions.contains(ext), "{ext} -> {}", hit.value);
            }
        }
    }

    #[test]
    fn unique_extensions_map_to_their_own_entry() {
        assert_eq!(classify("main.rs").unwrap().value, "rust");
        assert_eq!(classify("src/app/App.TSX").unwrap().value, "typescript");
        assert_eq!(classify("x.hpp").unwrap().value, "cpp");
    }

    #[test]
    fn shared_header_extension_goes_to_first_declared() {
        assert_eq!(classify("stdio.h").unwrap().value, "c");
    }

    #[test]
    fn unknown_or_missing_extension_is_none() {
        assert!(classify("README.md").is_none());
        assert!(classify("Makefile").is_none());
        assert!(classify("archive.tar.gz").is_none());
    }

    #[test]
    fn only_last_dot_counts() {
        assert_eq!(classify("component.test.js").unwrap().value, "javascript");
    }

    #[test]
    fn find_by_value_ignores_case() {
        assert_eq!(find_by_value("Python").unwrap().label, "Python");
        assert!(find_by_value("cobol").is_none());
    }
}
