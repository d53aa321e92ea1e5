use chart_embed::api::{ChartEngine, MAX_SERIES, StoreEngine, validate_input};
use chart_embed::core::{ErrorKind, ErrorSet, ErrorSeverity, InputData};
use chart_embed::observe::ChartStores;
use chart_embed::BridgeError;

fn kinds(input: &str) -> Vec<ErrorKind> {
    validate_input(&InputData::from_raw(input)).kinds().collect()
}

#[test]
fn well_formed_input_is_valid() {
    let errors = validate_input(&InputData::from_raw("date,a,b\n2020,1,2.5\n2021,,-3\n"));
    assert!(errors.is_empty());
    assert!(errors.is_valid());
}

#[test]
fn blank_input_reports_empty() {
    assert_eq!(kinds(""), vec![ErrorKind::Empty]);
    assert_eq!(kinds("  \n"), vec![ErrorKind::Empty]);
    assert_eq!(kinds("date,a\n"), vec![ErrorKind::Empty]);
}

#[test]
fn series_count_limits_are_enforced() {
    assert_eq!(kinds("date\n2020\n"), vec![ErrorKind::TooFewSeries]);

    let header: Vec<String> = (0..=MAX_SERIES + 1).map(|i| format!("c{i}")).collect();
    let row: Vec<String> = (0..=MAX_SERIES + 1).map(|i| i.to_string()).collect();
    let text = format!("{}\n{}\n", header.join(","), row.join(","));
    assert_eq!(kinds(&text), vec![ErrorKind::TooManySeries]);

    let header: Vec<String> = (0..=MAX_SERIES).map(|i| format!("c{i}")).collect();
    let row: Vec<String> = (0..=MAX_SERIES).map(|i| i.to_string()).collect();
    let text = format!("{}\n{}\n", header.join(","), row.join(","));
    assert!(kinds(&text).is_empty());
}

#[test]
fn ragged_rows_and_text_cells_are_reported_once() {
    let found = kinds("date,a,b\n2020,1\n2021,x,2\n2022,y,3,4\n");
    assert_eq!(found, vec![ErrorKind::UnevenSeries, ErrorKind::NanValues]);
}

#[test]
fn first_column_may_hold_text() {
    assert!(kinds("region,value\nNorth,10\nSouth,12\n").is_empty());
    assert_eq!(kinds("region,value\nNorth,inf\n"), vec![ErrorKind::NanValues]);
}

#[test]
fn engine_reports_replace_engine_text_with_local_text() {
    let set = ErrorSet::from_engine_report([
        ("NAN_VALUES", "engine wording"),
        ("UNEVEN_TZ", "more engine wording"),
    ])
    .expect("known kinds");

    let nan = set.get(ErrorKind::NanValues).expect("nan present");
    assert_eq!(nan.text, ErrorKind::NanValues.text());
    let tz = set.get(ErrorKind::UnevenTimezone).expect("tz present");
    assert_eq!(tz.severity, ErrorSeverity::Warning);
    assert!(!set.is_valid());

    let err = ErrorSet::from_engine_report([("MYSTERY", "?")]).expect_err("unknown kind");
    assert!(matches!(err, BridgeError::InvalidData(_)));
}

#[test]
fn warnings_alone_keep_the_set_valid_but_outstanding() {
    let mut set = ErrorSet::new();
    assert!(set.insert(ErrorKind::TooMuchRightAxis));
    assert!(!set.insert(ErrorKind::TooMuchRightAxis));

    assert!(set.is_valid());
    assert!(set.has_outstanding());
    assert_eq!(set.len(), 1);
}

#[test]
fn every_kind_parses_from_its_id() {
    for kind in ErrorKind::ALL {
        assert_eq!(kind.id().parse::<ErrorKind>().expect("id parses"), kind);
        assert!(!kind.text().is_empty());
    }
}

#[test]
fn store_engine_stays_silent_until_input_arrives() {
    let stores = ChartStores::new();
    let engine = StoreEngine::new(stores.clone());

    engine
        .receive_model(
            chart_embed::core::default_model(chart_embed::core::ChartFamily::Xy)
                .to_value()
                .expect("encode"),
        )
        .expect("receive");
    assert!(engine.input_received());
    assert!(stores.errors.with(ErrorSet::is_empty));

    let fresh = ChartStores::new();
    let engine = StoreEngine::new(fresh.clone());
    let mut model = chart_embed::core::default_model(chart_embed::core::ChartFamily::Xy);
    model.chart_props.input = InputData::blank();
    engine
        .receive_model(model.to_value().expect("encode"))
        .expect("receive");
    assert!(!engine.input_received());
    assert!(fresh.errors.with(ErrorSet::is_empty));

    engine
        .update_input("input", InputData::from_raw("a,b\n1,oops\n"))
        .expect("update");
    assert!(fresh.errors.with(|errors| errors.contains(ErrorKind::NanValues)));
}

#[test]
fn store_engine_routes_other_keys_into_extra_props() {
    let stores = ChartStores::new();
    let engine = StoreEngine::new(stores.clone());

    engine
        .update_input("secondaryInput", InputData::from_raw("q,r\n"))
        .expect("update");
    assert!(stores.properties.with(|props| props.extra.contains_key("secondaryInput")));

    let err = engine
        .update_input("", InputData::blank())
        .expect_err("empty key");
    assert!(matches!(err, BridgeError::InvalidData(_)));
}
