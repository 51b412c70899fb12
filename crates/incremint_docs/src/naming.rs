use std::path::{Path, PathBuf};

pub const DOCX_EXTENSION: &str = "docx";

/// `<input stem><suffix>.docx`. Directory components of `input` are dropped.
pub fn output_file_name(input: &Path, suffix: &str) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "quote".to_string());
    format!("{stem}{suffix}.{DOCX_EXTENSION}")
}

/// Output path inside `out_dir`. The same input name always maps to the same
/// path, so a rerun overwrites the previous document.
pub fn output_path(out_dir: &Path, input: &Path, suffix: &str) -> PathBuf {
    out_dir.join(output_file_name(input, suffix))
}

/// Source name used for a spreadsheet fetched by id.
pub fn combined_source_name(spreadsheet_id: &str) -> String {
    format!("combined_{spreadsheet_id}.xlsx")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUFFIX: &str = "_term_quote_final";

    #[test]
    fn test_strips_extension_and_directory() {
        assert_eq!(
            output_file_name(Path::new("/uploads/Sharma Quote.xlsx"), SUFFIX),
            "Sharma Quote_term_quote_final.docx"
        );
    }

    #[test]
    fn test_only_last_extension_removed() {
        assert_eq!(
            output_file_name(Path::new("quote.v2.xlsx"), SUFFIX),
            "quote.v2_term_quote_final.docx"
        );
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(
            output_file_name(Path::new("input"), SUFFIX),
            "input_term_quote_final.docx"
        );
    }

    #[test]
    fn test_empty_name_falls_back() {
        assert_eq!(
            output_file_name(Path::new(""), SUFFIX),
            "quote_term_quote_final.docx"
        );
    }

    #[test]
    fn test_output_path_is_deterministic() {
        let dir = Path::new("/tmp/out");
        let a = output_path(dir, Path::new("a/in.xlsx"), SUFFIX);
        let b = output_path(dir, Path::new("b/in.xlsx"), SUFFIX);
        assert_eq!(a, b);
        assert_eq!(a, PathBuf::from("/tmp/out/in_term_quote_final.docx"));
    }

    #[test]
    fn test_combined_source_name() {
        let name = combined_source_name("1AbC_d-9");
        assert_eq!(
            output_file_name(Path::new(&name), SUFFIX),
            "combined_1AbC_d-9_term_quote_final.docx"
        );
    }
}
