mod common;

use common::fixtures::*;
use common::{TestResult, exporter, init_logger, tree_from};
use plansheet::{Block, BlockDocument, DataKind, ExportError};
use plansheet_idf::HeadingLevel;
use plansheet_types::{SLOT_COUNT, TIME_SLOTS};

fn schedule_rows(doc: &BlockDocument) -> Vec<&Vec<String>> {
    doc.blocks
        .iter()
        .filter_map(|block| match block {
            Block::TableRow {
                cells,
                header: false,
            } if TIME_SLOTS.contains(&cells[0].as_str()) => Some(cells),
            _ => None,
        })
        .collect()
}

#[test]
fn full_week_sections_appear_in_fixed_order() -> TestResult {
    init_logger();
    let tree = tree_from(sample_tree())?;
    let doc = exporter()?.project_week(&tree, FULL_WEEK_ID)?;

    assert_eq!(doc.title, "Weekly Curriculum Plan - Term 1 Week 1");
    assert_eq!(doc.headings(HeadingLevel::H1), vec!["Weekly Curriculum Plan"]);
    assert_eq!(
        doc.headings(HeadingLevel::H2),
        vec![
            "Week Overview",
            "Weekly Learning Goals",
            "Stretch Curriculum Activities",
            "Weekly Notes & Resources",
            "Daily Activity Plans",
        ]
    );
    assert_eq!(doc.blocks.last(), Some(&Block::Paragraph(
        "For questions or updates, please contact your curriculum coordinator".to_string()
    )));
    Ok(())
}

#[test]
fn five_full_days_give_five_sections_of_twelve_rows() -> TestResult {
    init_logger();
    let tree = tree_from(sample_tree())?;
    let doc = exporter()?.project_week(&tree, FULL_WEEK_ID)?;

    let day_headings: Vec<&str> = doc
        .headings(HeadingLevel::H3)
        .into_iter()
        .filter(|h| h.contains(" - March "))
        .collect();
    assert_eq!(
        day_headings,
        vec![
            "Monday - March 3, 2025",
            "Tuesday - March 4, 2025",
            "Wednesday - March 5, 2025",
            "Thursday - March 6, 2025",
            "Friday - March 7, 2025",
        ]
    );

    let rows = schedule_rows(&doc);
    assert_eq!(rows.len(), 5 * SLOT_COUNT);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row[0], TIME_SLOTS[i % SLOT_COUNT]);
    }
    assert_eq!(rows[0][2], "MON activity 1");
    assert_eq!(rows[59][2], "FRI activity 12");
    Ok(())
}

#[test]
fn week_without_plan_keeps_header_and_daily_plans() -> TestResult {
    init_logger();
    let tree = tree_from(sample_tree())?;
    let doc = exporter()?.project_week(&tree, BARE_WEEK_ID)?;

    assert_eq!(
        doc.headings(HeadingLevel::H2),
        vec!["Week Overview", "Daily Activity Plans"]
    );
    assert!(doc.blocks.contains(&Block::Paragraph("Theme: Theme TBD".to_string())));
    assert_eq!(schedule_rows(&doc).len(), 2 * SLOT_COUNT);
    Ok(())
}

#[test]
fn shared_slot_lists_both_activities_in_order() -> TestResult {
    init_logger();
    let tree = tree_from(sample_tree())?;
    let doc = exporter()?.project_week(&tree, BARE_WEEK_ID)?;

    let rows = schedule_rows(&doc);
    assert_eq!(rows[1][1], "Literacy\nMaths");
    assert_eq!(rows[1][2], "Letter hunt\nCounting song");
    assert_eq!(rows[0][1], "No activities");
    assert_eq!(rows[0][2], "No activities planned");
    assert!(rows.iter().all(|row| row.iter().all(|cell| !cell.is_empty())));
    Ok(())
}

#[test]
fn week_without_days_says_so() -> TestResult {
    init_logger();
    let tree = tree_from(sample_tree())?;
    let doc = exporter()?.project_week(&tree, EMPTY_WEEK_ID)?;

    assert!(schedule_rows(&doc).is_empty());
    assert!(doc.blocks.contains(&Block::Paragraph(
        "No daily plans have been generated yet.".to_string()
    )));
    Ok(())
}

#[test]
fn markdown_keeps_slot_labels_verbatim() -> TestResult {
    init_logger();
    let tree = tree_from(sample_tree())?;
    let doc = exporter()?.project_week(&tree, FULL_WEEK_ID)?;
    let markdown = doc.to_markdown();

    assert!(markdown.starts_with("# Weekly Curriculum Plan\n"));
    assert!(markdown.contains("| Time Slot | Learning Area | Activity Description |\n|---|---|---|"));
    assert!(markdown.contains(&format!("| {} | Routine | MON activity 1 |", TIME_SLOTS[0])));

    assert_eq!(BlockDocument::from_markdown(doc.title.clone(), &markdown), doc);
    Ok(())
}

#[test]
fn notes_that_look_like_markdown_read_back_unchanged() -> TestResult {
    init_logger();
    let notes = "Pack list:\n- bring sun hats\n---\n**Reminder**\n# 3 spare shirts\n| cubby | labels |";
    let tree = tree_from(tree_with_notes(notes))?;
    let doc = exporter()?.project_week(&tree, FULL_WEEK_ID)?;

    assert!(doc.blocks.contains(&Block::Paragraph("- bring sun hats".to_string())));
    assert!(doc.blocks.contains(&Block::Paragraph("**Reminder**".to_string())));

    let reread = BlockDocument::from_markdown(doc.title.clone(), &doc.to_markdown());
    assert_eq!(reread, doc);
    assert!(!reread.blocks.contains(&Block::ListItem("bring sun hats".to_string())));
    Ok(())
}

#[test]
fn unknown_week_is_missing_data() -> TestResult {
    init_logger();
    let tree = tree_from(sample_tree())?;
    let err = exporter()?.project_week(&tree, "week-99").unwrap_err();
    assert!(matches!(
        err,
        ExportError::MissingData { kind: DataKind::Week, ref id } if id == "week-99"
    ));
    Ok(())
}
