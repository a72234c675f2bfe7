use crate::catalog::{BookFileRecord, Catalog, Variant};
use crate::links::LinkResolver;
use crate::output;
use crate::runner::{Options, Runner, RunnerError};
use crate::view::{self, SortColumn, SortState};

fn record(title: &str, kind: &str, identifier: &str) -> BookFileRecord {
    let mut r = BookFileRecord {
        title: title.to_string(),
        kind: kind.to_string(),
        file_id: None,
        cover_file: None,
    };
    if kind == "cover" {
        r.cover_file = Some(identifier.to_string());
    } else {
        r.file_id = Some(identifier.to_string());
    }
    r
}

fn sample_records() -> Vec<BookFileRecord> {
    vec![
        record("A", "pdf", "x1"),
        record("A", "audio", "x2"),
        record("B", "pdf", "x3"),
    ]
}

#[test]
fn group_collects_variants_per_title() {
    let catalog = Catalog::group(&sample_records());
    assert_eq!(catalog.len(), 2);
    let a = catalog.get("A").unwrap();
    assert_eq!(a.files.get(Variant::Pdf), Some("x1"));
    assert_eq!(a.files.get(Variant::Audio), Some("x2"));
    assert_eq!(a.files.get(Variant::Cover), None);
    let b = catalog.get("B").unwrap();
    assert_eq!(b.files.get(Variant::Pdf), Some("x3"));
}

#[test]
fn group_preserves_first_seen_title_order() {
    let records = vec![
        record("Zebra", "pdf", "z1"),
        record("Apple", "pdf", "a1"),
        record("Zebra", "audio", "z2"),
    ];
    let catalog = Catalog::group(&records);
    let titles: Vec<_> = catalog.entries().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Zebra", "Apple"]);
}

#[test]
fn group_is_idempotent_on_identical_input() {
    let records = sample_records();
    let first = Catalog::group(&records);
    let second = Catalog::group(&records);
    assert_eq!(first.entries(), second.entries());
}

#[test]
fn group_duplicate_title_and_type_last_write_wins() {
    let records = vec![record("A", "pdf", "old"), record("A", "pdf", "new")];
    let catalog = Catalog::group(&records);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("A").unwrap().files.get(Variant::Pdf), Some("new"));
}

#[test]
fn group_titles_are_case_sensitive() {
    let records = vec![record("A", "pdf", "x1"), record("a", "pdf", "x2")];
    let catalog = Catalog::group(&records);
    assert_eq!(catalog.len(), 2);
}

#[test]
fn group_ignores_unrecognized_type() {
    let records = vec![record("A", "pdf", "x1"), record("A", "epub", "x9")];
    let catalog = Catalog::group(&records);
    let a = catalog.get("A").unwrap();
    assert_eq!(a.files.get(Variant::Pdf), Some("x1"));
    assert_eq!(a.files.get(Variant::Audio), None);
    assert_eq!(a.files.get(Variant::Cover), None);
}

#[test]
fn group_malformed_record_contributes_missing_variant() {
    let records = vec![BookFileRecord {
        title: "A".to_string(),
        kind: "pdf".to_string(),
        file_id: None,
        cover_file: None,
    }];
    let catalog = Catalog::group(&records);
    let a = catalog.get("A").unwrap();
    assert!(a.files.is_empty());
}

#[test]
fn group_cover_uses_cover_file_not_file_id() {
    let mut r = record("C", "cover", "cover1.jpg");
    r.file_id = Some("should-not-be-used".to_string());
    let catalog = Catalog::group(&[r]);
    assert_eq!(
        catalog.get("C").unwrap().files.get(Variant::Cover),
        Some("cover1.jpg")
    );
}

#[test]
fn filter_matches_case_insensitive_substring() {
    let catalog = Catalog::group(&sample_records());
    let filtered = catalog.filter("b");
    let titles: Vec<_> = filtered.entries().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["B"]);
    assert_eq!(
        filtered.get("B").unwrap().files.get(Variant::Pdf),
        Some("x3")
    );
}

#[test]
fn filter_trims_query_before_matching() {
    let catalog = Catalog::group(&sample_records());
    let filtered = catalog.filter("  a  ");
    let titles: Vec<_> = filtered.entries().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["A"]);
}

#[test]
fn filter_empty_or_whitespace_query_returns_everything() {
    let catalog = Catalog::group(&sample_records());
    assert_eq!(catalog.filter("").len(), catalog.len());
    assert_eq!(catalog.filter("   ").len(), catalog.len());
}

#[test]
fn filter_results_are_subset_of_unfiltered() {
    let catalog = Catalog::group(&[
        record("The Sealed Nectar", "pdf", "1"),
        record("Stories of the Prophets", "pdf", "2"),
        record("Fortress of the Muslim", "audio", "3"),
    ]);
    for query in ["the", "of", "muslim", "zzz", ""] {
        let filtered = catalog.filter(query);
        for entry in filtered.entries() {
            assert!(catalog.get(&entry.title).is_some());
            if !query.trim().is_empty() {
                assert!(entry
                    .title
                    .to_lowercase()
                    .contains(&query.trim().to_lowercase()));
            }
        }
    }
}

#[test]
fn sort_toggle_same_column_flips_direction() {
    let mut state = SortState::default();
    assert_eq!(state.column, SortColumn::No);
    assert!(state.ascending);
    state.toggle(SortColumn::No);
    assert!(!state.ascending);
    state.toggle(SortColumn::No);
    assert!(state.ascending);
}

#[test]
fn sort_toggle_new_column_resets_to_ascending() {
    let mut state = SortState::default();
    state.toggle(SortColumn::Title);
    assert_eq!(state.column, SortColumn::Title);
    assert!(state.ascending);
    state.toggle(SortColumn::Title);
    assert!(!state.ascending);
    state.toggle(SortColumn::No);
    assert_eq!(state.column, SortColumn::No);
    assert!(state.ascending);
}

#[test]
fn sort_column_parse_accepts_known_columns() {
    assert_eq!(SortColumn::parse(" Title "), Some(SortColumn::Title));
    assert_eq!(SortColumn::parse("NO"), Some(SortColumn::No));
    assert_eq!(SortColumn::parse("author"), None);
}

#[test]
fn rows_sorted_by_title_ascending() {
    let catalog = Catalog::group(&sample_records());
    let rows = view::build_rows(&catalog, SortState::new(SortColumn::Title, true));
    assert_eq!(rows[0].position, 1);
    assert_eq!(rows[0].title, "A");
    assert_eq!(rows[1].position, 2);
    assert_eq!(rows[1].title, "B");
}

#[test]
fn title_descending_exactly_reverses_ascending() {
    let catalog = Catalog::group(&[
        record("Charlie", "pdf", "3"),
        record("alpha", "pdf", "1"),
        record("Bravo", "pdf", "2"),
    ]);
    let asc = view::build_rows(&catalog, SortState::new(SortColumn::Title, true));
    let desc = view::build_rows(&catalog, SortState::new(SortColumn::Title, false));
    let asc_titles: Vec<_> = asc.iter().map(|r| r.title.as_str()).collect();
    let mut desc_titles: Vec<_> = desc.iter().map(|r| r.title.as_str()).collect();
    desc_titles.reverse();
    assert_eq!(asc_titles, desc_titles);
    assert_eq!(asc_titles, vec!["alpha", "Bravo", "Charlie"]);
}

#[test]
fn position_sort_ascending_is_identity_ordering() {
    let catalog = Catalog::group(&[
        record("Zebra", "pdf", "z"),
        record("Apple", "pdf", "a"),
        record("Mango", "pdf", "m"),
    ]);
    let rows = view::build_rows(&catalog, SortState::default());
    let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Zebra", "Apple", "Mango"]);
}

#[test]
fn position_sort_descending_reverses_catalog_order() {
    let catalog = Catalog::group(&[
        record("Zebra", "pdf", "z"),
        record("Apple", "pdf", "a"),
        record("Mango", "pdf", "m"),
    ]);
    let rows = view::build_rows(&catalog, SortState::new(SortColumn::No, false));
    let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Mango", "Apple", "Zebra"]);
}

#[test]
fn rows_are_renumbered_one_to_n_after_sorting() {
    let catalog = Catalog::group(&[
        record("Zebra", "pdf", "z"),
        record("Apple", "pdf", "a"),
        record("Mango", "pdf", "m"),
    ]);
    for state in [
        SortState::new(SortColumn::Title, false),
        SortState::new(SortColumn::No, false),
    ] {
        let rows = view::build_rows(&catalog, state);
        let positions: Vec<_> = rows.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }
}

#[test]
fn filtered_rows_renumber_from_one() {
    let catalog = Catalog::group(&[
        record("Apple", "pdf", "a"),
        record("Banana", "pdf", "b"),
        record("Cherry", "pdf", "c"),
    ]);
    let rows = view::build_rows(&catalog.filter("cherry"), SortState::default());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].position, 1);
    assert_eq!(rows[0].title, "Cherry");
}

#[test]
fn link_resolver_joins_drive_ids_and_cover_paths() {
    let links = LinkResolver::default();
    assert_eq!(
        links.download_url("abc123"),
        "https://drive.google.com/uc?export=download&id=abc123"
    );
    assert_eq!(
        links.view_url("abc123"),
        "https://drive.google.com/uc?export=view&id=abc123"
    );
    assert_eq!(links.cover_path("cover1.jpg"), "covers/cover1.jpg");
}

#[test]
fn link_resolver_accepts_overrides() {
    let links = LinkResolver::new(
        Some("https://files.example.org/get?id=".to_string()),
        Some("assets/covers".to_string()),
    );
    assert_eq!(links.download_url("x"), "https://files.example.org/get?id=x");
    assert_eq!(links.cover_path("c.png"), "assets/covers/c.png");
}

#[test]
fn cover_record_resolves_to_cover_folder_target() {
    let catalog = Catalog::group(&[record("C", "cover", "cover1.jpg")]);
    let rows = view::build_rows(&catalog, SortState::default());
    let records = output::build_records(&rows, &LinkResolver::default());
    assert_eq!(records[0].cover_url.as_deref(), Some("covers/cover1.jpg"));
    assert_eq!(records[0].pdf_url, None);
}

#[test]
fn output_format_parse_and_inference() {
    assert_eq!(output::OutputFormat::parse("TEXT"), Some(output::OutputFormat::Text));
    assert_eq!(output::OutputFormat::parse("json"), Some(output::OutputFormat::Json));
    assert_eq!(output::OutputFormat::parse("htm"), Some(output::OutputFormat::Html));
    assert_eq!(output::OutputFormat::parse("xml"), None);
    assert_eq!(
        output::infer_format_from_path("./catalog.html"),
        Some(output::OutputFormat::Html)
    );
    assert_eq!(
        output::infer_format_from_path("out.JSON"),
        Some(output::OutputFormat::Json)
    );
    assert_eq!(output::infer_format_from_path("books"), None);
}

#[test]
fn render_text_marks_missing_variants() {
    let catalog = Catalog::group(&[record("A", "pdf", "x1")]);
    let rows = view::build_rows(&catalog, SortState::default());
    let records = output::build_records(&rows, &LinkResolver::default());
    let text = String::from_utf8(output::render_text(&records)).unwrap();
    assert!(text.contains("N/A"));
    assert!(text.contains("https://drive.google.com/uc?export=download&id=x1"));
}

#[test]
fn render_json_is_valid_and_ordered() {
    let catalog = Catalog::group(&sample_records());
    let rows = view::build_rows(&catalog, SortState::default());
    let records = output::build_records(&rows, &LinkResolver::default());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output::render_json(&records)).unwrap();
    assert_eq!(parsed[0]["position"], 1);
    assert_eq!(parsed[0]["title"], "A");
    assert_eq!(parsed[1]["title"], "B");
}

#[test]
fn render_html_embeds_records_island() {
    let catalog = Catalog::group(&[record("A</script>", "pdf", "x1")]);
    let rows = view::build_rows(&catalog, SortState::default());
    let records = output::build_records(&rows, &LinkResolver::default());
    let html = String::from_utf8(output::render_html(&records)).unwrap();
    assert!(html.contains(r#"<script type="application/json" id="records-data">"#));
    assert!(html.contains("book-table-body"));
    assert!(html.contains("cover-modal"));
    // closing tags inside the island must not terminate the script element
    assert!(html.contains(r"A<\/script>"));
}

#[test]
fn runner_rejects_missing_and_conflicting_sources() {
    assert!(matches!(
        Runner::new(Options::default()),
        Err(RunnerError::NoSource)
    ));
    assert!(matches!(
        Runner::new(Options {
            url: Some("https://example.org/books.json".to_string()),
            input_file: Some("./books.json".to_string()),
            ..Default::default()
        }),
        Err(RunnerError::ConflictingSources)
    ));
}

#[test]
fn runner_rejects_invalid_url_and_timeout() {
    assert!(matches!(
        Runner::new(Options {
            url: Some("not a url".to_string()),
            ..Default::default()
        }),
        Err(RunnerError::InvalidUrl { .. })
    ));
    assert!(matches!(
        Runner::new(Options {
            input_file: Some("./books.json".to_string()),
            timeout_seconds: 0,
            ..Default::default()
        }),
        Err(RunnerError::InvalidTimeout { .. })
    ));
}

#[tokio::test]
async fn runner_groups_records_from_local_file() {
    let path = std::env::temp_dir().join(format!("bookdex-test-{}.json", std::process::id()));
    let body = r#"[
        {"Title": "A", "Type": "pdf", "FileId": "x1"},
        {"Title": "A", "Type": "audio", "FileId": "x2"},
        {"Title": "B", "Type": "pdf", "FileId": "x3"},
        {"Title": "C", "Type": "cover", "CoverFile": "cover1.jpg"}
    ]"#;
    tokio::fs::write(&path, body).await.unwrap();

    let runner = Runner::new(Options {
        input_file: Some(path.to_string_lossy().to_string()),
        ..Default::default()
    })
    .unwrap();
    let outcome = runner.run().await.unwrap();
    let _ = tokio::fs::remove_file(&path).await;

    assert_eq!(outcome.records_total, 4);
    assert_eq!(outcome.catalog.len(), 3);
    assert_eq!(
        outcome.catalog.get("A").unwrap().files.get(Variant::Audio),
        Some("x2")
    );
    assert_eq!(
        outcome.catalog.get("C").unwrap().files.get(Variant::Cover),
        Some("cover1.jpg")
    );
}

#[tokio::test]
async fn runner_surfaces_malformed_json_once() {
    let path = std::env::temp_dir().join(format!("bookdex-bad-{}.json", std::process::id()));
    tokio::fs::write(&path, "{not json").await.unwrap();

    let runner = Runner::new(Options {
        input_file: Some(path.to_string_lossy().to_string()),
        ..Default::default()
    })
    .unwrap();
    let err = runner.run().await.unwrap_err();
    let _ = tokio::fs::remove_file(&path).await;

    assert!(matches!(err, RunnerError::InvalidJson { .. }));
}

#[tokio::test]
async fn runner_reports_missing_file() {
    let runner = Runner::new(Options {
        input_file: Some("./definitely-not-here.json".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert!(matches!(
        runner.run().await,
        Err(RunnerError::FileRead { .. })
    ));
}
