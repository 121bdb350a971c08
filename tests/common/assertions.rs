/// Assert that a PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $pdf.text();
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert that the text strings appear in this order in `haystack`
#[macro_export]
macro_rules! assert_in_order {
    ($haystack:expr, [$($needle:expr),+ $(,)?]) => {
        let haystack: &str = &$haystack;
        let mut from = 0usize;
        $(
            match haystack[from..].find($needle) {
                Some(pos) => from += pos + $needle.len(),
                None => panic!(
                    "'{}' not found after offset {} in:\n{}",
                    $needle, from, haystack
                ),
            }
        )+
    };
}
