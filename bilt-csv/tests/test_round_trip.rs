use bilt_core::TransactionRecord;
use bilt_csv::{generate, parse, validate, CsvOptions};
use chrono::NaiveDate;

fn sample() -> Vec<TransactionRecord> {
    let d = |m, day| NaiveDate::from_ymd_opt(2026, m, day).unwrap();
    let mut quoted = TransactionRecord::new(d(2, 3), "Joe's \"Best\" Tacos, LLC", -23.10);
    quoted.memo = "split with Sam,\nsettled".to_string();
    let mut categorized = TransactionRecord::new(d(2, 5), "Whole Foods Market", -82.14);
    categorized.category = "Groceries".to_string();

    vec![
        TransactionRecord::new(d(2, 1), "Blue Bottle Coffee", -6.25),
        quoted,
        categorized,
        TransactionRecord::new(d(2, 9), "Target", 12.34),
        TransactionRecord::new(d(2, 11), "Delta Air Lines", -1234.56),
    ]
}

#[test]
fn test_generate_then_parse_reproduces_records() {
    let records = sample();
    let csv = generate(&records, &CsvOptions::default()).unwrap();
    assert!(validate(&csv).valid);
    assert_eq!(parse(&csv), records);
}

#[test]
fn test_empty_round_trip() {
    let csv = generate(&[], &CsvOptions::default()).unwrap();
    assert_eq!(csv, "Date,Payee,Amount,Category,Memo");
    assert!(validate(&csv).valid);
    assert!(parse(&csv).is_empty());
}

#[test]
fn test_description_header_round_trip() {
    let options = CsvOptions {
        headers: vec!["Date".into(), "Description".into(), "Amount".into(), "Notes".into()],
    };
    let records = sample();
    let csv = generate(&records, &options).unwrap();
    let parsed = parse(&csv);

    assert_eq!(parsed.len(), records.len());
    for (p, r) in parsed.iter().zip(&records) {
        assert_eq!(p.payee, r.payee);
        assert_eq!(p.memo, r.memo);
        assert_eq!(p.category, "");
    }
}

#[test]
fn test_round_trip_with_carriage_returns_edge_quotes_and_zero() {
    let d = NaiveDate::from_ymd_opt(2026, 2, 14).unwrap();
    let mut edge_quotes = TransactionRecord::new(d, "\"Quoted\" Deli", 0.0);
    edge_quotes.memo = "she said \"hi\"".to_string();
    let mut windows_memo = TransactionRecord::new(d, "Corner Store", -3.5);
    windows_memo.memo = "first line\r\nsecond line".to_string();
    let records = vec![edge_quotes, windows_memo];

    let csv = generate(&records, &CsvOptions::default()).unwrap();
    assert!(validate(&csv).valid);
    let parsed = parse(&csv);
    assert_eq!(parsed, records);
    assert_eq!(parsed[0].amount, 0.0);
}
