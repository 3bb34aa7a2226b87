mod common;

use assert2::{check, let_assert};
use common::{TempVault, empty_vault, sample_vault};
use rstest::rstest;
use tagfind::error::VaultError;
use tagfind::{TagCatalog, TagCollector, TagFinder};

fn finder(vault: &TempVault) -> TagFinder {
    TagFinder::new(TagCatalog::new(TagCollector::new(vault.path(), vec![])))
}

/// Test: collection finds frontmatter and inline tags, counted per note.
#[rstest]
fn collect_sample_vault(sample_vault: TempVault) {
    let collected = TagCollector::new(sample_vault.path(), vec![]).collect().unwrap();

    check!(
        collected.tags
            == [
                "area/finances",
                "area/travel",
                "idea",
                "places/travel",
                "project",
                "travel"
            ]
    );
    check!(collected.notes == 5);
    check!(collected.frequency.get("project") == Some(&4));
    check!(collected.frequency.get("area/travel") == Some(&3));
    check!(collected.frequency.get("not-a-tag").is_none());
    check!(collected.frequency.get("ignored").is_none());
}

/// Test: the exact tag outranks hierarchical ones even when they are used more.
#[rstest]
fn exact_tag_ranks_first(sample_vault: TempVault) {
    let mut finder = finder(&sample_vault);
    let results = finder.suggestions("travel", None).unwrap();

    let labels: Vec<&str> = results.iter().map(|r| r.label.as_str()).collect();
    check!(labels == ["travel", "area/travel", "places/travel"]);
}

/// Test: usage counts from the vault feed the matcher's ranking.
#[rstest]
fn vault_frequency_weights_scores(sample_vault: TempVault) {
    let mut finder = finder(&sample_vault);
    let results = finder.suggestions("a", None).unwrap();

    let area_travel = results.iter().find(|r| r.label == "area/travel").unwrap();
    check!(area_travel.score == finder.matcher().match_score("a", "area/travel"));
    check!(finder.matcher().frequency_of("area/travel") == 3);
}

/// Test: searching from the command line prints ranked tags.
/// `area/travel` is in three notes, enough to overtake the shorter `travel`.
#[rstest]
fn cli_search_text(sample_vault: TempVault) {
    let output = sample_vault.run(&["search", "trav"]).unwrap();

    check!(output.starts_with("Tags matching 'trav' (3):"));
    let ranked: Vec<&str> = output.lines().skip(2).collect();
    check!(ranked[0].starts_with("1. area/travel "));
    check!(ranked[1].starts_with("2. travel "));
    check!(ranked[2].starts_with("3. places/travel "));
}

/// Test: JSON output carries labels and scores.
#[rstest]
fn cli_search_json(sample_vault: TempVault) {
    let output = sample_vault
        .run(&["search", "fin", "--format", "json"])
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    check!(value["query"] == "fin");
    check!(value["results"][0]["label"] == "area/finances");
    check!(value["results"][0]["score"].as_f64().unwrap() > 0.0);
}

/// Test: an empty query lists the most used tags first, honouring the limit.
#[rstest]
fn cli_browse_most_used(sample_vault: TempVault) {
    let output = sample_vault
        .run(&["search", "--limit", "2", "--format", "json"])
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    let_assert!(Some(results) = value["results"].as_array());
    check!(results.len() == 2);
    check!(results[0]["label"] == "project");
    check!(results[1]["label"] == "area/travel");
}

/// Test: --expression prints the search query for the best match.
#[rstest]
#[case("travel", "tag:#travel")]
#[case("proj", "tag:#project")]
fn cli_search_expression(sample_vault: TempVault, #[case] query: &str, #[case] expected: &str) {
    let output = sample_vault
        .run(&["search", query, "--expression"])
        .unwrap();
    check!(output == expected);
}

/// Test: --expression with no match is an error, a plain search is not.
#[rstest]
fn cli_no_match(sample_vault: TempVault) {
    let output = sample_vault.run(&["search", "xyz"]).unwrap();
    check!(output.starts_with("No tags match 'xyz'."));

    let_assert!(Err(err) = sample_vault.run(&["search", "xyz", "--expression"]));
    check!(err.to_string().contains("No tags match 'xyz'"));
}

/// Test: listing tags orders by count, then name.
#[rstest]
fn cli_tags_listing(sample_vault: TempVault) {
    let output = sample_vault.run(&["tags"]).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    check!(lines[0] == "6 tags:");
    check!(lines[2] == "4  project");
    check!(lines[3] == "3  area/travel");
    check!(lines[4] == "2  area/finances");
    check!(lines[5] == "1  idea");
}

/// Test: exclude globs from a config file keep notes out of the tag set.
#[rstest]
fn cli_config_excludes(sample_vault: TempVault) {
    sample_vault.create_note("tagfind.toml", "exclude = [\"trips/**\"]\nformat = \"json\"\n");
    let config = sample_vault.path().join("tagfind.toml");
    let config = config.display().to_string();

    let output = sample_vault
        .run(&["--config", config.as_str(), "tags"])
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    let_assert!(Some(tags) = value.as_array());
    let names: Vec<&str> = tags.iter().filter_map(|t| t["tag"].as_str()).collect();
    check!(names == ["project", "area/finances"]);
}

/// Test: command runs read the vault's own config file, not machine-wide ones.
#[rstest]
fn cli_uses_isolated_config(sample_vault: TempVault) {
    let default_run = sample_vault.run(&["search", "trav"]).unwrap();
    check!(default_run.starts_with("Tags matching 'trav' (3):"));

    std::fs::write(sample_vault.config_path(), "limit = 1\nformat = \"json\"\n").unwrap();
    let output = sample_vault.run(&["search", "trav"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    let_assert!(Some(results) = value["results"].as_array());
    check!(results.len() == 1);
}

/// Test: an empty vault produces no suggestions and a friendly message.
#[rstest]
fn empty_vault_has_no_tags(empty_vault: TempVault) {
    check!(finder(&empty_vault).suggestions("", None).unwrap().is_empty());
    check!(empty_vault.run(&["tags"]).unwrap() == "No tags found.\n");
}

/// Test: a missing vault surfaces a typed error.
#[rstest]
fn missing_vault_errors(empty_vault: TempVault) {
    let missing = empty_vault.path().join("nope");
    let mut finder = TagFinder::new(TagCatalog::new(TagCollector::new(missing, vec![])));

    let_assert!(Err(err) = finder.suggestions("tag", None));
    let_assert!(Some(VaultError::NotFound { .. }) = err.downcast_ref::<VaultError>());
}
