/*!
 * Terminology table loading and placeholder protocol tests
 */

use termlock::extraction::ChunkExtractor;
use termlock::terminology::table::{TermProvenance, TermTable};
use termlock::terminology::{postprocess, Preprocessor};

use crate::common;

#[test]
fn test_termTable_userCsv_commaDelimited_shouldLoadAllRows() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_comma_terms(dir.path(), "terms.csv").unwrap();

    let load = TermTable::load("ak", Some(&path), false);

    assert!(load.diagnostics.is_empty());
    let counts = load.table.counts();
    assert_eq!(counts.total, 3);
    assert_eq!(counts.user, 3);
    assert_eq!(load.table.lookup("export market"), Some("amannɔne dwam"));
}

#[test]
fn test_termTable_userCsv_semicolonDelimited_shouldParseIdentically() {
    let dir = common::create_temp_dir().unwrap();
    let comma = common::create_comma_terms(dir.path(), "comma.csv").unwrap();
    let semicolon = common::create_semicolon_terms(dir.path(), "semicolon.csv").unwrap();

    let from_comma = TermTable::load("ak", Some(&comma), false);
    let from_semicolon = TermTable::load("ak", Some(&semicolon), false);

    for key in ["cocoa", "export market", "fertilizer"] {
        assert_eq!(
            from_comma.table.lookup(key),
            from_semicolon.table.lookup(key),
            "mismatch for key '{}'",
            key
        );
    }
    assert_eq!(
        from_comma.table.counts().total,
        from_semicolon.table.counts().total
    );
}

#[test]
fn test_termTable_userCsv_tabDelimitedNoNamedColumns_shouldUseFirstTwo() {
    let dir = common::create_temp_dir().unwrap();
    let content = "eng\ttwi\nmaize\taburo\nyam\tbayerɛ\n";
    let path = common::create_test_file(dir.path(), "terms.tsv", content).unwrap();

    let load = TermTable::load("ak", Some(&path), false);

    assert!(load.diagnostics.is_empty());
    assert_eq!(load.table.lookup("maize"), Some("aburo"));
    assert_eq!(load.table.lookup("yam"), Some("bayerɛ"));
}

#[test]
fn test_termTable_userCsv_rowsMissingFields_shouldBeSkipped() {
    let dir = common::create_temp_dir().unwrap();
    let content = "\
term,translation
cocoa,kookoo
,orphan translation
no translation,
maize,aburo
";
    let path = common::create_test_file(dir.path(), "terms.csv", content).unwrap();

    let load = TermTable::load("ak", Some(&path), false);

    assert!(load.diagnostics.is_empty());
    assert_eq!(load.table.counts().total, 2);
    assert_eq!(load.table.lookup("no translation"), None);
}

#[test]
fn test_termTable_userCsv_singleColumn_shouldSurfaceMalformedDiagnostic() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "bad.csv", "only_one_column\nvalue\n").unwrap();

    let load = TermTable::load("ak", Some(&path), false);

    assert!(load.table.is_empty());
    assert_eq!(load.diagnostics.len(), 1);
}

#[test]
fn test_termTable_userOverBuiltin_shouldAlwaysWin() {
    let dir = common::create_temp_dir().unwrap();
    // "cocoa" collides with the builtin entry for target "ak"
    let path = common::create_comma_terms(dir.path(), "terms.csv").unwrap();

    let load = TermTable::load("ak", Some(&path), true);

    assert!(load.diagnostics.is_empty());
    assert_eq!(load.table.lookup("cocoa"), Some("koko pa"));
    // Non-colliding builtin entries are still present
    assert_eq!(load.table.lookup("water"), Some("nsuo"));
}

#[test]
fn test_roundTrip_noEngine_shouldEqualInPlaceTermSubstitution() {
    let mut table = TermTable::new();
    table.insert("cocoa", "kookoo", TermProvenance::User);
    table.insert("export market", "amannɔne dwam", TermProvenance::User);

    let preprocessor = Preprocessor::new(Box::new(ChunkExtractor::new()));
    let text = "The export market needs cocoa. Cocoa is king!";
    let pre = preprocessor.preprocess(&table, text);
    let post = postprocess(&pre.text, &pre.replacements, &pre.original_cases);

    assert_eq!(
        post.text,
        "Amannɔne dwam needs kookoo. Kookoo is king!"
    );
    assert!(post.missed_placeholders.is_empty());
}

#[test]
fn test_preprocess_placeholderNotInTranslationText_shouldStayUnambiguous() {
    let mut table = TermTable::new();
    // A curated rendering that itself looks placeholder-ish must not
    // collide with the synthetic tokens
    table.insert("cocoa", "<0> kookoo", TermProvenance::User);

    let preprocessor = Preprocessor::new(Box::new(ChunkExtractor::new()));
    let pre = preprocessor.preprocess(&table, "Sell cocoa now.");

    assert_eq!(pre.text, "Sell <1> now.");
    assert!(!pre.replacements.contains_key("<0>"));
    let post = postprocess(&pre.text, &pre.replacements, &pre.original_cases);
    assert_eq!(post.text, "Sell <0> kookoo now.");
}
