use chrono::NaiveDate;

use super::assemble::is_holding_name;
use super::columns::{is_header_like, looks_like_header, map_columns};
use super::locator::locate_tables;
use super::merge::PageMerger;
use super::types::{LocatedTable, RawTable, Role, TableConfidence};
use super::*;
use crate::config::Lookups;
use crate::decode::{DecodedDocument, DecodedPage, DetectedTable};
use crate::metadata::DocumentMetadata;
use crate::model::DocumentResult;

fn strings(row: &[&str]) -> Vec<String> {
    row.iter().map(|cell| cell.to_string()).collect()
}

fn detection(rows: &[&[&str]], bbox: Option<[f64; 4]>) -> DetectedTable {
    DetectedTable {
        rows: rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                    .collect()
            })
            .collect(),
        bbox,
    }
}

fn page(tables: Vec<DetectedTable>, text: &str) -> DecodedPage {
    DecodedPage {
        text: text.to_string(),
        tables,
    }
}

fn located(page_index: usize, header: &[&str], rows: &[&[&str]]) -> LocatedTable {
    LocatedTable {
        table: RawTable {
            header: strings(header),
            rows: rows.iter().map(|row| strings(row)).collect(),
            page_index,
        },
        confidence: TableConfidence::WithHeader,
    }
}

fn headerless(page_index: usize, rows: &[&[&str]]) -> LocatedTable {
    LocatedTable {
        table: RawTable {
            header: Vec::new(),
            rows: rows.iter().map(|row| strings(row)).collect(),
            page_index,
        },
        confidence: TableConfidence::Headerless,
    }
}

fn metadata() -> DocumentMetadata {
    DocumentMetadata {
        date: NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date"),
        amc: "MotilalOswal".to_string(),
        fund_name: "Large and Midcap Fund".to_string(),
    }
}

fn lookups() -> Lookups {
    Lookups::builtin().expect("builtin lookups")
}

fn run(pages: Vec<DecodedPage>, options: &ExtractOptions) -> DocumentResult {
    extract_document(
        "fixture.json",
        &DecodedDocument { pages },
        &metadata(),
        Some(1000.0),
        &lookups(),
        options,
    )
}

const SCENARIO_HEADER: &[&str] = &["Name", "% to NAV", "ISIN"];

#[test]
fn map_columns_assigns_roles_from_synonyms() {
    let schema = map_columns(&strings(SCENARIO_HEADER)).expect("mapped");
    assert_eq!(schema.get(Role::SecurityName), Some(0));
    assert_eq!(schema.get(Role::PctOfAum), Some(1));
    assert_eq!(schema.get(Role::Isin), Some(2));

    let schema = map_columns(&strings(&[
        "Company",
        "Industry",
        "Quantity",
        "Market Value (Rs. Lakhs)",
        "% to Net Assets",
        "Rating",
    ]))
    .expect("mapped");
    assert_eq!(schema.get(Role::SecurityName), Some(0));
    assert_eq!(schema.get(Role::Sector), Some(1));
    assert_eq!(schema.get(Role::Quantity), Some(2));
    assert_eq!(schema.get(Role::MarketValue), Some(3));
    assert_eq!(schema.get(Role::PctOfAum), Some(4));
    assert_eq!(schema.len(), 5);
}

#[test]
fn map_columns_keeps_first_column_per_role() {
    let schema = map_columns(&strings(&["Scrip", "Weight", "Scrip", "Weight"])).expect("mapped");
    assert_eq!(schema.get(Role::SecurityName), Some(0));
    assert_eq!(schema.get(Role::PctOfAum), Some(1));
    assert_eq!(schema.len(), 2);
}

#[test]
fn map_columns_requires_a_security_column() {
    assert_eq!(map_columns(&strings(&["ISIN", "% to NAV"])), None);
    assert_eq!(map_columns(&strings(&["", ""])), None);
}

#[test]
fn header_detection_ignores_data_rows() {
    assert!(looks_like_header(&strings(SCENARIO_HEADER)));
    assert!(!looks_like_header(&strings(&["Acme Ltd", "3.25%", "INE000A01011"])));
    assert!(!looks_like_header(&strings(&["Name", ""])));

    assert!(is_header_like(&strings(&["Company", "Weight"])));
    assert!(!is_header_like(&strings(&["Name", "Rating"])));
}

#[test]
fn sector_allocation_header_maps_to_sector() {
    let schema = map_columns(&strings(&["Security", "Sector Allocation", "Weight"])).expect("mapped");
    assert_eq!(schema.get(Role::SecurityName), Some(0));
    assert_eq!(schema.get(Role::Sector), Some(1));
    assert_eq!(schema.get(Role::PctOfAum), Some(2));
}

#[test]
fn data_row_naming_one_role_is_not_a_header() {
    let row = strings(&["Bajaj Holdings & Investment Ltd", "-", "-"]);
    assert!(!looks_like_header(&row));
    assert!(!is_header_like(&row));

    let page = page(
        vec![detection(
            &[
                &["Bajaj Holdings & Investment Ltd", "-", "-"],
                &["Acme Ltd", "3.25%", "INE000A01011"],
            ],
            None,
        )],
        "",
    );
    let tables = locate_tables(0, &page);

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].confidence, TableConfidence::Headerless);
    assert_eq!(tables[0].table.rows.len(), 2);
}

#[test]
fn compatible_schemas_ignore_column_positions() {
    let left = map_columns(&strings(&["Name", "% to NAV", "ISIN"])).expect("mapped");
    let moved = map_columns(&strings(&["ISIN", "Security", "Weight"])).expect("mapped");
    let narrower = map_columns(&strings(&["Name", "% to NAV"])).expect("mapped");

    assert!(left.is_compatible(&moved));
    assert!(!left.is_compatible(&narrower));
}

#[test]
fn locate_tables_skips_captions_above_the_header() {
    let page = page(
        vec![detection(
            &[
                &["Portfolio Holdings", "", ""],
                SCENARIO_HEADER,
                &["Acme Ltd", "3.25%", "INE000A01011"],
                &["", "", ""],
            ],
            None,
        )],
        "",
    );

    let tables = locate_tables(4, &page);

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].confidence, TableConfidence::WithHeader);
    assert_eq!(tables[0].table.header, strings(SCENARIO_HEADER));
    assert_eq!(
        tables[0].table.rows,
        vec![strings(&["Acme Ltd", "3.25%", "INE000A01011"])]
    );
    assert_eq!(tables[0].table.page_index, 4);
}

#[test]
fn locate_tables_reports_headerless_detections() {
    let page = page(
        vec![detection(
            &[&["Acme Ltd", "3.25%"], &["Beta Corp Ltd", "1.10%"]],
            None,
        )],
        "",
    );

    let tables = locate_tables(0, &page);

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].confidence, TableConfidence::Headerless);
    assert!(tables[0].table.header.is_empty());
    assert_eq!(tables[0].table.rows.len(), 2);
}

#[test]
fn locate_tables_splits_side_by_side_blocks() {
    let page = page(
        vec![detection(
            &[
                &["Scrip", "Weight", "", "Scrip", "Weight"],
                &["Acme Ltd", "3.1%", "", "Beta Corp Ltd", "2.0%"],
                &["Gamma Ltd", "1.5%", "", "", ""],
            ],
            None,
        )],
        "",
    );

    let tables = locate_tables(0, &page);

    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].table.header, strings(&["Scrip", "Weight"]));
    assert_eq!(
        tables[0].table.rows,
        vec![strings(&["Acme Ltd", "3.1%"]), strings(&["Gamma Ltd", "1.5%"])]
    );
    assert_eq!(tables[1].table.header, strings(&["Scrip", "Weight"]));
    assert_eq!(tables[1].table.rows, vec![strings(&["Beta Corp Ltd", "2.0%"])]);
}

#[test]
fn locate_tables_keeps_the_better_of_overlapping_detections() {
    let fragment = detection(
        &[&["Acme Ltd", "3.25%", "INE000A01011"]],
        Some([0.0, 100.0, 200.0, 150.0]),
    );
    let full = detection(
        &[SCENARIO_HEADER, &["Acme Ltd", "3.25%", "INE000A01011"]],
        Some([0.0, 80.0, 300.0, 150.0]),
    );
    let elsewhere = detection(
        &[&["Name", "Weight"], &["Zeta Ltd", "0.5%"]],
        Some([0.0, 400.0, 300.0, 500.0]),
    );

    let tables = locate_tables(0, &page(vec![fragment, full, elsewhere], ""));

    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].table.header, strings(SCENARIO_HEADER));
    assert_eq!(tables[1].table.header, strings(&["Name", "Weight"]));
}

#[test]
fn locate_tables_prefers_the_earlier_of_identical_detections() {
    let rows: &[&[&str]] = &[SCENARIO_HEADER, &["Acme Ltd", "3.25%", "INE000A01011"]];
    let tables = locate_tables(0, &page(vec![detection(rows, None), detection(rows, None)], ""));
    assert_eq!(tables.len(), 1);
}

#[test]
fn merger_concatenates_continuations_without_repeating_the_header() {
    let mut merger = PageMerger::new(false);

    let (closed, first) = merger.push_page(
        0,
        vec![located(
            0,
            SCENARIO_HEADER,
            &[&["Alpha Ltd", "2.0%", ""], &["Bravo Ltd", "1.5%", ""]],
        )],
    );
    assert!(closed.is_empty());
    assert!(!first.continued);

    let (closed, second) = merger.push_page(
        1,
        vec![located(
            1,
            SCENARIO_HEADER,
            &[
                &["Charlie Ltd", "1.0%", ""],
                &["Delta Ltd", "0.8%", ""],
                &["Echo Ltd", "0.5%", ""],
            ],
        )],
    );
    assert!(closed.is_empty());
    assert!(second.continued);
    assert_eq!(second.mapped_tables, 1);

    let merged = merger.finish().expect("open table");
    assert_eq!(merged.rows.len(), 5);
    assert_eq!(merged.first_page, 0);
    assert_eq!(merged.last_page, 1);
    let names = merged
        .rows
        .iter()
        .map(|row| row[0].as_str())
        .collect::<Vec<&str>>();
    assert_eq!(
        names,
        vec!["Alpha Ltd", "Bravo Ltd", "Charlie Ltd", "Delta Ltd", "Echo Ltd"]
    );
    assert!(merger.finish().is_none());
}

#[test]
fn merger_never_joins_different_schemas() {
    let mut merger = PageMerger::new(false);
    merger.push_page(0, vec![located(0, SCENARIO_HEADER, &[&["Alpha Ltd", "2.0%", ""]])]);

    let (closed, outcome) = merger.push_page(
        1,
        vec![located(1, &["Name", "% to NAV"], &[&["Bravo Ltd", "1.5%"]])],
    );

    assert!(!outcome.continued);
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].rows.len(), 1);
    assert_eq!(merger.finish().expect("open").rows[0][0], "Bravo Ltd");
}

#[test]
fn merger_requires_adjacent_pages() {
    let mut merger = PageMerger::new(false);
    merger.push_page(0, vec![located(0, SCENARIO_HEADER, &[&["Alpha Ltd", "2.0%", ""]])]);

    let (closed, outcome) = merger.push_page(1, Vec::new());
    assert_eq!(outcome.mapped_tables, 0);
    assert_eq!(closed.len(), 1);

    let (closed, outcome) =
        merger.push_page(2, vec![located(2, SCENARIO_HEADER, &[&["Bravo Ltd", "1.5%", ""]])]);
    assert!(closed.is_empty());
    assert!(!outcome.continued);
    assert_eq!(merger.finish().expect("open").first_page, 2);
}

#[test]
fn merger_treats_header_like_first_row_as_a_new_table() {
    let mut merger = PageMerger::new(false);
    merger.push_page(0, vec![located(0, SCENARIO_HEADER, &[&["Alpha Ltd", "2.0%", ""]])]);

    let (closed, outcome) = merger.push_page(
        1,
        vec![located(
            1,
            SCENARIO_HEADER,
            &[&["Company", "Weight", "ISIN"], &["Bravo Ltd", "1.5%", ""]],
        )],
    );

    assert!(!outcome.continued);
    assert_eq!(closed.len(), 1);
}

#[test]
fn merger_only_continues_with_the_first_table_of_a_page() {
    let mut merger = PageMerger::new(false);
    merger.push_page(0, vec![located(0, SCENARIO_HEADER, &[&["Alpha Ltd", "2.0%", ""]])]);

    let (closed, outcome) = merger.push_page(
        1,
        vec![
            located(1, SCENARIO_HEADER, &[&["Bravo Ltd", "1.5%", ""]]),
            located(1, SCENARIO_HEADER, &[&["Charlie Ltd", "1.0%", ""]]),
        ],
    );

    assert!(outcome.continued);
    assert_eq!(outcome.mapped_tables, 2);
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].rows.len(), 2);
    assert_eq!(merger.finish().expect("open").rows.len(), 1);
}

#[test]
fn merger_stitches_headerless_pages_only_when_enabled() {
    let first_page = || vec![located(0, SCENARIO_HEADER, &[&["Alpha Ltd", "2.0%", ""]])];
    let second_page = || vec![headerless(1, &[&["Bravo Ltd", "1.5%", "INE000A01011"]])];

    let mut strict = PageMerger::new(false);
    strict.push_page(0, first_page());
    let (closed, outcome) = strict.push_page(1, second_page());
    assert_eq!(outcome.mapped_tables, 0);
    assert_eq!(outcome.unmapped_tables, 1);
    assert_eq!(closed.len(), 1);

    let mut stitching = PageMerger::new(true);
    stitching.push_page(0, first_page());
    let (closed, outcome) = stitching.push_page(1, second_page());
    assert!(closed.is_empty());
    assert!(outcome.continued);
    assert_eq!(stitching.finish().expect("open").rows.len(), 2);

    let mut narrow = PageMerger::new(true);
    narrow.push_page(0, first_page());
    let (_, outcome) = narrow.push_page(1, vec![headerless(1, &[&["Bravo Ltd", "1.5%"]])]);
    assert!(!outcome.continued);
}

#[test]
fn fallback_patterns_read_common_line_layouts() {
    let patterns = FallbackPatterns::builtin().expect("patterns");
    let text = "\
Acme Ltd 3.25% INE000A01011
Acme Ltd INE000A01011 1,234.50 3.25
Beta Corp Ltd   INE111B01022 2.10%
Reliance Industries 8.1%
Infosys Ltd 5.75
Total 100.00%
Scheme Returns 12.5%
Acme Ltd 150%
Page 3 of 10";

    let rows = patterns.extract(text);
    let summary = rows
        .iter()
        .map(|row| (row.security.as_str(), row.pattern.as_str()))
        .collect::<Vec<(&str, &str)>>();

    assert_eq!(
        summary,
        vec![
            ("Acme Ltd", "name_pct_isin"),
            ("Acme Ltd", "name_isin_value_pct"),
            ("Beta Corp Ltd", "name_isin_pct"),
            ("Reliance Industries", "name_pct_sign"),
            ("Infosys Ltd", "company_suffix_decimal"),
        ]
    );
    assert_eq!(rows[0].isin.as_deref(), Some("INE000A01011"));
    assert_eq!(rows[0].pct_of_aum, 3.25);
    assert_eq!(rows[1].market_value, Some(1234.5));
    assert_eq!(rows[2].pct_of_aum, 2.1);
    assert_eq!(rows[4].pct_of_aum, 5.75);
}

#[test]
fn fallback_patterns_keep_value_columns_out_of_the_name() {
    let patterns = FallbackPatterns::builtin().expect("patterns");

    let rows = patterns.extract(
        "HDFC Bank Ltd   1,234.50   5.2%\nInfosys Ltd 12345 3.10%\nNifty 50 ETF 2.0%\nTata Motors Ltd* 1.5%",
    );

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].security, "HDFC Bank Ltd");
    assert_eq!(rows[0].market_value, Some(1234.5));
    assert_eq!(rows[0].pct_of_aum, 5.2);
    assert_eq!(rows[0].pattern, "name_value_pct");
    assert_eq!(rows[1].security, "Infosys Ltd");
    assert_eq!(rows[1].market_value, Some(12345.0));
    assert_eq!(rows[1].pct_of_aum, 3.1);
    assert_eq!(rows[2].security, "Nifty 50 ETF");
    assert_eq!(rows[2].market_value, None);
    assert_eq!(rows[2].pattern, "name_pct_sign");
    assert_eq!(rows[3].security, "Tata Motors Ltd");
}

#[test]
fn fallback_pattern_push_validates_groups() {
    let mut patterns = FallbackPatterns::builtin().expect("patterns");
    let count = patterns.len();

    assert!(patterns.push("no_pct", r"^(?P<security>.+)$").is_err());
    assert!(patterns.push("broken", r"^(?P<security>.+").is_err());
    patterns
        .push("pipe", r"^(?P<security>[^|]+)\|(?P<pct>[\d.]+)$")
        .expect("valid pattern");

    assert_eq!(patterns.len(), count + 1);
}

#[test]
fn holding_name_filter_drops_totals_and_labels() {
    assert!(is_holding_name("Acme Ltd"));
    assert!(is_holding_name("Larsen & Toubro Ltd."));
    for rejected in [
        "Total",
        "Sub-Total",
        "GRAND TOTAL",
        "Net Receivables / (Payables)",
        "Cash & Cash Equivalents",
        "TREPS",
        "Equity & Equity related",
        "Name",
        "ab",
        "12345",
    ] {
        assert!(!is_holding_name(rejected), "{rejected} should be rejected");
    }
}

#[test]
fn sector_allocation_reads_known_sectors_from_every_page() {
    let result = run(
        vec![
            page(
                vec![detection(
                    &[SCENARIO_HEADER, &["Acme Ltd", "3.25%", "INE000A01011"]],
                    None,
                )],
                "Portfolio\nAcme Ltd 3.25% INE000A01011",
            ),
            page(
                Vec::new(),
                "\
Sector Allocation
Banks 24.5%   IT - Software 12.0%
Finance 8.1%
Equity 98.5%
Banking 30%
Total 100.00%",
            ),
        ],
        &ExtractOptions::default(),
    );

    assert!(result.success);
    assert_eq!(
        result
            .sector_allocation
            .iter()
            .map(|(sector, pct)| (sector.as_str(), *pct))
            .collect::<Vec<(&str, f64)>>(),
        vec![
            ("Banking", 24.5),
            ("Financial Services", 8.1),
            ("Information Technology", 12.0),
        ]
    );
}

#[test]
fn table_page_yields_one_record_and_skips_fallback() {
    let result = run(
        vec![page(
            vec![detection(
                &[SCENARIO_HEADER, &["Acme Ltd", "3.25%", "INE000A01011"]],
                None,
            )],
            "Beta Corp Ltd 2.5%",
        )],
        &ExtractOptions::default(),
    );

    assert!(result.success);
    assert_eq!(result.diagnostic, None);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.stats.fallback_pages, 0);
    assert_eq!(result.stats.table_pages, 1);

    let record = &result.records[0];
    assert_eq!(record.security, "Acme Ltd");
    assert_eq!(record.pct_of_aum, Some(3.25));
    assert_eq!(record.isin.as_deref(), Some("INE000A01011"));
    assert_eq!(record.amc, "Motilal Oswal");
    assert_eq!(record.fund_name, "Large and Midcap Fund");
    assert_eq!(record.sector, "Other");
    assert_eq!(record.market_value, None);
}

#[test]
fn text_only_page_yields_the_same_record_via_fallback() {
    let from_table = run(
        vec![page(
            vec![detection(
                &[SCENARIO_HEADER, &["Acme Ltd", "3.25%", "INE000A01011"]],
                None,
            )],
            "",
        )],
        &ExtractOptions::default(),
    );
    let from_text = run(
        vec![page(Vec::new(), "Acme Ltd 3.25% INE000A01011")],
        &ExtractOptions::default(),
    );

    assert!(from_text.success);
    assert_eq!(from_text.stats.fallback_pages, 1);
    assert_eq!(from_text.stats.fallback_rows, 1);
    assert_eq!(from_text.records, from_table.records);
}

#[test]
fn document_without_rows_fails_with_diagnostic() {
    let result = run(
        vec![page(Vec::new(), "Fund manager commentary"), page(Vec::new(), "")],
        &ExtractOptions::default(),
    );

    assert!(!result.success);
    assert!(result.records.is_empty());
    let diagnostic = result.diagnostic.expect("diagnostic");
    assert!(diagnostic.contains("2 pages"));

    let empty = run(Vec::new(), &ExtractOptions::default());
    assert!(!empty.success);
    assert_eq!(empty.diagnostic.as_deref(), Some("document has no pages"));
}

#[test]
fn document_with_only_total_rows_reports_drops() {
    let result = run(
        vec![page(
            vec![detection(
                &[SCENARIO_HEADER, &["Total", "100.00%", ""], &["Cash", "0.5%", ""]],
                None,
            )],
            "",
        )],
        &ExtractOptions::default(),
    );

    assert!(!result.success);
    assert_eq!(result.dropped_rows, 2);
    assert!(
        result
            .diagnostic
            .expect("diagnostic")
            .contains("all 2 candidate rows were dropped")
    );
}

#[test]
fn sector_headings_label_following_rows() {
    let result = run(
        vec![page(
            vec![detection(
                &[
                    &["Name of Instrument", "Rating", "% to Net Assets"],
                    &["Banks", "", ""],
                    &["HDFC Bank Ltd.", "", "9.5%"],
                    &["Kotak Mahindra Bank Ltd", "", "3.1"],
                    &["Sub Total", "", "12.6"],
                    &["IT - Software", "", ""],
                    &["Infosys Limited", "", "6.2%"],
                    &["Total", "", "100.00"],
                    &["Net Receivables / (Payables)", "", "0.4"],
                ],
                None,
            )],
            "",
        )],
        &ExtractOptions::default(),
    );

    assert!(result.success);
    assert_eq!(result.stats.sector_heading_rows, 2);
    assert_eq!(result.dropped_rows, 3);

    let summary = result
        .records
        .iter()
        .map(|record| (record.security.as_str(), record.sector.as_str(), record.pct_of_aum))
        .collect::<Vec<_>>();
    assert_eq!(
        summary,
        vec![
            ("HDFC Bank Ltd.", "Banking", Some(9.5)),
            ("Kotak Mahindra Bank Ltd", "Banking", Some(3.1)),
            ("Infosys Limited", "Information Technology", Some(6.2)),
        ]
    );
    assert_eq!(result.records[0].isin.as_deref(), Some("INE040A01034"));
}

#[test]
fn row_sector_column_wins_over_guessing() {
    let result = run(
        vec![page(
            vec![detection(
                &[
                    &["Company", "Industry", "Quantity", "Market Value", "% to NAV"],
                    &["HDFC Bank Ltd", "Finance", "1,000", "12,345.67", "5.2%"],
                    &["Acme Ltd", "", "—", "-", "1.0"],
                ],
                None,
            )],
            "",
        )],
        &ExtractOptions::default(),
    );

    let records = &result.records;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].sector, "Financial Services");
    assert_eq!(records[0].quantity, Some(1000.0));
    assert_eq!(records[0].market_value, Some(12345.67));
    assert_eq!(records[0].pct_of_aum, Some(5.2));
    assert_eq!(records[1].sector, "Other");
    assert_eq!(records[1].quantity, None);
    assert_eq!(records[1].market_value, None);
}

#[test]
fn multi_page_table_keeps_row_order() {
    let result = run(
        vec![
            page(
                vec![detection(
                    &[
                        SCENARIO_HEADER,
                        &["Alpha Ltd", "2.0%", ""],
                        &["Bravo Ltd", "1.5%", ""],
                    ],
                    None,
                )],
                "",
            ),
            page(
                vec![detection(
                    &[
                        SCENARIO_HEADER,
                        &["Charlie Ltd", "1.0%", ""],
                        &["Delta Ltd", "0.8%", ""],
                        &["Echo Ltd", "0.5%", ""],
                    ],
                    None,
                )],
                "",
            ),
        ],
        &ExtractOptions::default(),
    );

    assert_eq!(result.stats.continuations, 1);
    assert_eq!(result.stats.tables_merged, 1);
    assert_eq!(result.stats.table_rows, 5);
    let names = result
        .records
        .iter()
        .map(|record| record.security.as_str())
        .collect::<Vec<&str>>();
    assert_eq!(
        names,
        vec!["Alpha Ltd", "Bravo Ltd", "Charlie Ltd", "Delta Ltd", "Echo Ltd"]
    );
}

#[test]
fn side_by_side_records_follow_reading_order() {
    let result = run(
        vec![page(
            vec![detection(
                &[
                    &["Scrip", "Weight", "", "Scrip", "Weight"],
                    &["Acme Ltd", "3.1%", "", "Beta Corp Ltd", "2.0%"],
                    &["Gamma Ltd", "1.5%", "", "", ""],
                ],
                None,
            )],
            "",
        )],
        &ExtractOptions::default(),
    );

    let names = result
        .records
        .iter()
        .map(|record| record.security.as_str())
        .collect::<Vec<&str>>();
    assert_eq!(names, vec!["Acme Ltd", "Gamma Ltd", "Beta Corp Ltd"]);
}

#[test]
fn options_control_isin_lookup_and_market_value_derivation() {
    let pages = || {
        vec![page(
            vec![detection(&[&["Company", "Weight"], &["Infosys Ltd", "3.25%"]], None)],
            "",
        )]
    };

    let defaults = run(pages(), &ExtractOptions::default());
    assert!(defaults.records[0].isin.is_some());
    assert_eq!(defaults.records[0].market_value, None);
    assert_eq!(defaults.stats.isin_lookups, 1);

    let result = run(
        pages(),
        &ExtractOptions {
            stitch_headerless: false,
            lookup_missing_isin: false,
            derive_market_value: true,
        },
    );
    assert_eq!(result.records[0].isin, None);
    assert_eq!(result.records[0].market_value, Some(32.5));
    assert_eq!(result.stats.derived_market_values, 1);
}

#[test]
fn batch_preserves_input_order_and_isolates_failures() {
    let lookups = lookups();
    let jobs = vec!["first", "broken", "second"];

    let batch = run_batch_with_threads(&jobs, 2, |job| {
        if *job == "broken" {
            return DocumentResult::failed(*job, "could not decode");
        }
        extract_document(
            job,
            &DecodedDocument {
                pages: vec![page(Vec::new(), &format!("Acme {job} Ltd 1.25%"))],
            },
            &metadata(),
            None,
            &lookups,
            &ExtractOptions::default(),
        )
    })
    .expect("batch");

    let sources = batch
        .documents
        .iter()
        .map(|document| document.source.as_str())
        .collect::<Vec<&str>>();
    assert_eq!(sources, vec!["first", "broken", "second"]);
    assert_eq!(batch.succeeded(), 2);
    assert_eq!(batch.failed(), 1);
    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.records[1].security, "Acme second Ltd");
}
