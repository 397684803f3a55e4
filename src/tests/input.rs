use super::{extract_headings, find_documents, load_document, page_title};
use crate::formats::markdown::MarkdownFormat;
use crate::heading::Heading;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PAGE: &str = "# Title

intro

## Getting Started

text

### Details ###

## Getting Started

## C# tips
";

#[test]
fn test_headings_in_document_order() {
    let headings = extract_headings(PAGE, &MarkdownFormat).unwrap();
    let levels: Vec<usize> = headings.iter().map(|h| h.level).collect();
    let titles: Vec<&str> = headings.iter().map(|h| h.title.as_str()).collect();
    let lines: Vec<usize> = headings.iter().map(|h| h.line).collect();
    assert_eq!(levels, [1, 2, 3, 2, 2]);
    assert_eq!(
        titles,
        ["Title", "Getting Started", "Details", "Getting Started", "C# tips"]
    );
    assert_eq!(lines, [0, 4, 8, 10, 12]);
}

#[test]
fn test_ids_unique_within_page() {
    let headings = extract_headings(PAGE, &MarkdownFormat).unwrap();
    let ids: Vec<&str> = headings.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(
        ids,
        ["title", "getting-started", "details", "getting-started-1", "c-tips"]
    );
}

#[test]
fn test_code_blocks_are_not_headings() {
    let source = "## Real\n\n```sh\n# just a comment\n```\n";
    let headings = extract_headings(source, &MarkdownFormat).unwrap();
    assert_eq!(headings, [Heading::new("real", 2, "Real", 0)]);
}

#[test]
fn test_page_without_headings() {
    let headings = extract_headings("Just a paragraph.\n", &MarkdownFormat).unwrap();
    assert!(headings.is_empty());
}

#[test]
fn test_page_title_prefers_first_h1() {
    let headings = extract_headings(PAGE, &MarkdownFormat).unwrap();
    assert_eq!(page_title(Path::new("book/intro.md"), &headings), "Title");
    assert_eq!(page_title(Path::new("book/intro.md"), &headings[1..]), "intro");
}

#[test]
fn test_find_documents_filters_and_sorts() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("guide")).unwrap();
    fs::write(dir.path().join("b.md"), "# B\n").unwrap();
    fs::write(dir.path().join("a.md"), "# A\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "skip").unwrap();
    fs::write(dir.path().join("guide").join("setup.md"), "# Setup\n").unwrap();

    let found = find_documents(vec![dir.path().to_path_buf()], &["md".to_string()]).unwrap();
    let names: Vec<String> = found
        .iter()
        .map(|p| {
            p.strip_prefix(dir.path())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    assert_eq!(names, ["a.md", "b.md", "guide/setup.md"]);
}

#[test]
fn test_named_files_kept_regardless_of_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "## Heading\n").unwrap();
    let found = find_documents(vec![path.clone()], &["md".to_string()]).unwrap();
    assert_eq!(found, [path]);
}

#[test]
fn test_load_document_reads_text_and_headings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("page.md");
    fs::write(&path, PAGE).unwrap();
    let (text, headings) = load_document(&path, &MarkdownFormat).unwrap();
    assert_eq!(text, PAGE);
    assert_eq!(headings.len(), 5);

    assert!(load_document(&dir.path().join("missing.md"), &MarkdownFormat).is_err());
}

#[test]
fn test_suffixed_ids_do_not_collide_with_numbered_titles() {
    let headings =
        extract_headings("## Intro\n\n## Intro\n\n## Intro 1\n\n## Intro\n", &MarkdownFormat).unwrap();
    let ids: Vec<&str> = headings.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, ["intro", "intro-1", "intro-1-1", "intro-2"]);
}
