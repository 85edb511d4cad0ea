//! File-extension based language detection

/// Extension to language tag mapping
static EXTENSION_LANGUAGES: &[(&str, &str)] = &[
    (".py", "Python"),
    (".js", "JavaScript"),
    (".ts", "TypeScript"),
    (".java", "Java"),
    (".cpp", "C++"),
    (".c", "C"),
    (".cs", "C#"),
    (".go", "Go"),
    (".rs", "Rust"),
    (".php", "PHP"),
    (".rb", "Ruby"),
    (".swift", "Swift"),
    (".kt", "Kotlin"),
    (".scala", "Scala"),
    (".r", "R"),
    (".sql", "SQL"),
    (".sh", "Shell"),
    (".yml", "YAML"),
    (".yaml", "YAML"),
    (".json", "JSON"),
    (".xml", "XML"),
    (".html", "HTML"),
    (".css", "CSS"),
    (".md", "Markdown"),
];

/// Detect the programming language from a file name.
///
/// The match is case-insensitive on the extension; unknown or missing
/// extensions map to `"Unknown"`.
pub fn detect_language(file_name: &str) -> &'static str {
    let lowered = file_name.to_lowercase();

    match lowered.rfind('.') {
        Some(idx) => {
            let ext = &lowered[idx..];
            EXTENSION_LANGUAGES
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, language)| *language)
                .unwrap_or("Unknown")
        }
        None => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_languages() {
        assert_eq!(detect_language("main.py"), "Python");
        assert_eq!(detect_language("lib.rs"), "Rust");
        assert_eq!(detect_language("index.html"), "HTML");
        assert_eq!(detect_language("config.yaml"), "YAML");
        assert_eq!(detect_language("config.yml"), "YAML");
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert_eq!(detect_language("MAIN.PY"), "Python");
        assert_eq!(detect_language("Readme.MD"), "Markdown");
    }

    #[test]
    fn unknown_extensions_map_to_unknown() {
        assert_eq!(detect_language("binary.exe"), "Unknown");
        assert_eq!(detect_language("Makefile"), "Unknown");
        assert_eq!(detect_language(""), "Unknown");
    }

    #[test]
    fn uses_last_extension_segment() {
        assert_eq!(detect_language("archive.tar.py"), "Python");
        assert_eq!(detect_language(".gitignore"), "Unknown");
    }
}
