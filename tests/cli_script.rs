mod navigation_support;

use assert_cmd::Command;
use navigation_support::NavigationTestHarness;
use predicates::str::contains;

const SAVE_BAROLO: &str = "start
taste rosso
pick colore Rubino
next
next
next
pick qualita Buona
next
text nome Barolo
text produttore 'G. Conterno'
save
confirm
";

#[test]
fn script_mode_runs_basic_flow() {
    let home = tempfile::tempdir().unwrap();
    let input = format!("{SAVE_BAROLO}exit\n");

    let mut cmd = Command::cargo_bin("tasting_core_cli").unwrap();
    cmd.env("TASTING_CORE_HOME", home.path())
        .env("TASTING_CORE_CLI_SCRIPT", "1")
        .env("NO_COLOR", "1")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Screen: vista_rosso"))
        .stdout(contains("Rubino selected."))
        .stdout(contains("Saved Rosso evaluation #1."));

    let json = std::fs::read_to_string(home.path().join("red_wine_database.json")).unwrap();
    assert!(json.contains("\"Barolo\""));
    assert!(json.contains("\"G. Conterno\""));
}

#[test]
fn saved_record_carries_the_full_field_set() {
    let harness = NavigationTestHarness::new();
    harness.run_script(SAVE_BAROLO);

    let json = harness.collection("red_wine_database.json");
    let record = &json["_default"]["1"];
    assert_eq!(record["colore_rosso"], "Rubino");
    assert_eq!(record["qualita_rosso"], "Buona");
    assert_eq!(record["nome_rosso"], "Barolo");
    assert_eq!(record["alcol_rosso"], "");
    assert_eq!(record["limpidezza_rosso"], "");
    assert_eq!(record.as_object().map(|fields| fields.len()), Some(18));
}

#[test]
fn edit_then_delete_through_the_archive() {
    let harness = NavigationTestHarness::new();
    harness.run_script(SAVE_BAROLO);

    let output = harness.run_script(
        "start
archive rosso
show 1
edit 1
next
next
next
pick qualita Ottima
next
save
confirm
",
    );
    assert!(output.stdout.contains("Barolo"));
    assert!(output.stdout.contains("G. Conterno   Annata N/D"));
    assert!(output.stdout.contains("Updated Rosso evaluation #1."));
    assert!(output.stdout.contains("Screen: archivio_rosso"));

    let json = harness.collection("red_wine_database.json");
    assert_eq!(json["_default"]["1"]["qualita_rosso"], "Ottima");
    assert_eq!(json["_default"]["1"]["colore_rosso"], "Rubino");

    let output = harness.run_script("start\narchive rosso\ndelete 1\nconfirm\n");
    assert!(output.stdout.contains("SEI SICURO?"));
    assert!(output.stdout.contains("Deleted Rosso evaluation #1."));
    assert!(output.stdout.contains("Nessun vino rosso archiviato."));

    let json = harness.collection("red_wine_database.json");
    assert_eq!(
        json["_default"].as_object().map(|table| table.len()),
        Some(0)
    );
}

#[test]
fn dismissing_the_save_dialog_keeps_the_store_empty() {
    let harness = NavigationTestHarness::new();
    let output = harness.run_script(
        "start
taste bianco
pick colore 'Giallo paglierino'
next
next
next
next
save
dismiss
status
",
    );
    assert!(output.stdout.contains("Sei sicuro?"));
    assert!(output.stdout.contains("Screen   : info_bianco"));
    assert!(output.stdout.contains("Selected : 1 field(s)"));
    assert!(!harness.home().join("white_wine_database.json").exists()
        || harness.collection("white_wine_database.json")["_default"]
            .as_object()
            .is_some_and(|table| table.is_empty()));
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let harness = NavigationTestHarness::new();
    let output = harness.run_script("strat\n");
    assert!(output.stdout.contains("Unknown command `strat`"));
    assert!(output.stdout.contains("Suggestion: `start`?"));
}

#[test]
fn out_of_place_commands_are_reported_and_skipped() {
    let harness = NavigationTestHarness::new();
    let output = harness.run_script("next\ntaste rosso\nstart\ntaste verde\nstatus\n");
    assert!(output.stdout.contains("`welcome` is not a form screen"));
    assert!(output.stdout.contains("unknown category `verde`"));
    assert!(output.stdout.contains("Screen   : selection"));
}

#[test]
fn back_on_welcome_asks_before_exiting() {
    let harness = NavigationTestHarness::new();
    let output = harness.run_script("back\nconfirm\nstatus\n");
    assert!(output.stdout.contains("Vuoi uscire?"));
    assert!(output.stdout.contains("Arrivederci."));
    assert!(!output.stdout.contains("=== Status ==="));
}

#[test]
fn menu_exit_leaves_immediately() {
    let harness = NavigationTestHarness::new();
    let output = harness.run_script("start\ntaste rosato\nmenu exit\nstatus\n");
    assert!(output.stdout.contains("Screen: vista_rosato"));
    assert!(!output.stdout.contains("=== Status ==="));
}

#[test]
fn help_lists_commands_by_group() {
    let harness = NavigationTestHarness::new();
    let output = harness.run_script("help\nhelp pick\nhelp pik\n");
    let tasting = output.stdout.find("=== Tasting ===");
    let archive = output.stdout.find("=== Archive ===");
    let session = output.stdout.find("=== Session ===");
    assert!(tasting.is_some() && archive.is_some() && session.is_some());
    assert!(tasting < archive && archive < session);
    assert!(output.stdout.contains("=== Help: pick ==="));
    assert!(output.stdout.contains("  Group: Tasting"));
    assert!(output.stdout.contains("Suggestion: `pick`?"));
}
