//! Roster CSV → ContractStore, through a real file on disk.

use std::io::Write;

use cfk_contracts::{
    parse_roster_file, parse_roster_str, ContractError, ContractStore, Micros, RosterError,
    RosterOptions,
};

const ROSTER: &str = "\
symbol,root_symbol,asset_name,start_date,end_date,notice_date,expiration_date,auto_close_date,tick_size,multiplier,exchange
FOG16,FO,Foo,2015-02-05,2016-09-19,2016-02-26,2016-02-26,2016-02-26,0.001,1000.0,CME
FOF16,FO,Foo,2015-01-05,2016-08-19,2016-01-26,2016-01-26,2016-01-26,0.001,1000.0,CME
";

#[test]
fn roster_file_loads_into_store() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(ROSTER.as_bytes()).unwrap();

    let records = parse_roster_file(f.path(), &RosterOptions::default()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].asset_name.as_deref(), Some("Foo"));
    assert_eq!(records[0].multiplier, Micros::new(1_000_000_000));

    let store = ContractStore::from_records(records).unwrap();
    let fo = store.group("FO").unwrap();
    assert_eq!(fo.contracts()[0].symbol, "FOF16");
    assert_eq!(fo.contracts()[1].symbol, "FOG16");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = parse_roster_file(&dir.path().join("nope.csv"), &RosterOptions::default())
        .unwrap_err();
    assert!(matches!(err, RosterError::Io(_)));
}

const HEADER: &str = "symbol,root_symbol,start_date,end_date,notice_date,expiration_date,auto_close_date,tick_size,multiplier,exchange\n";

#[test]
fn unparseable_decimal_is_a_roster_error_with_row_and_column() {
    let src = format!("{HEADER}FOF16,FO,2015-01-05,2016-08-19,2016-01-26,2016-01-26,2016-01-26,0.001,1e3,CME\n");
    assert_eq!(
        parse_roster_str(&src, &RosterOptions::default()).unwrap_err(),
        RosterError::ParseField {
            row: 2,
            field: "multiplier",
            raw: "1e3".to_string(),
        }
    );
}

#[test]
fn non_positive_decimal_is_a_malformed_record_at_store_build() {
    let src = format!("{HEADER}FOF16,FO,2015-01-05,2016-08-19,2016-01-26,2016-01-26,2016-01-26,0.000,1000.0,CME\n");
    let records = parse_roster_str(&src, &RosterOptions::default()).unwrap();
    assert_eq!(records[0].tick_size, Micros::ZERO);

    assert!(matches!(
        ContractStore::from_records(records),
        Err(ContractError::MalformedContractRecord { ref symbol, .. }) if symbol == "FOF16"
    ));
}
