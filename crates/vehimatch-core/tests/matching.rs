use vehimatch_core::{Catalog, Matcher, MatcherConfig, MatchResult, Normalizer, VehicleRecord};

const TOYOTA_86: &str = "6434473696559104";
const AMAROK: &str = "4951649860714496";
const GOLF_R: &str = "5824662093168640";
const GOLF_GTI: &str = "4628393442148352";

fn fixture_catalog() -> Catalog {
    let vehicles = [
        (TOYOTA_86, "toyota", "86", "gt", "automatic", "petrol", "rear wheel drive", 10),
        (AMAROK, "volkswagen", "amarok", "tdi580 ultimate", "automatic", "diesel", "four wheel drive", 15),
        (GOLF_R, "volkswagen", "golf", "r", "automatic", "petrol", "four wheel drive", 18),
        (GOLF_GTI, "volkswagen", "golf", "gti", "automatic", "petrol", "four wheel drive", 16),
    ];

    let mut builder = Catalog::builder();
    for (id, make, model, badge, transmission, fuel, drive, listings) in vehicles {
        builder
            .insert(
                VehicleRecord::new(id)
                    .with_make(make)
                    .with_model(model)
                    .with_badge(badge)
                    .with_transmission_type(transmission)
                    .with_fuel_type(fuel)
                    .with_drive_type(drive),
            )
            .unwrap();
        builder.listing_count(id, listings).unwrap();
    }
    builder.build()
}

fn match_one(description: &str) -> MatchResult {
    let matcher = Matcher::new(MatcherConfig::default()).unwrap();
    matcher.match_one(&fixture_catalog(), description)
}

fn assert_match(result: &MatchResult, id: &str, confidence: u8) {
    assert_eq!(
        result.vehicle_id.as_ref().map(|v| v.as_str()),
        Some(id),
        "wrong vehicle for {:?}",
        result.input
    );
    assert_eq!(result.confidence, confidence, "wrong confidence for {:?}", result.input);
}

#[test]
fn make_only_match() {
    let result = match_one("toyota");
    assert_match(&result, TOYOTA_86, 3);
    assert_eq!(result.listing_count, Some(10));
}

#[test]
fn model_only_match() {
    assert_match(&match_one("86"), TOYOTA_86, 2);
}

#[test]
fn badge_only_match() {
    assert_match(&match_one("ultimate"), AMAROK, 2);
}

#[test]
fn full_badge_match_scores_same_as_partial() {
    assert_match(&match_one("tdi580 ultimate"), AMAROK, 2);
}

#[test]
fn shared_transmission_ties_to_most_listed() {
    // Every vehicle scores 1; Golf R has the most listings. round(1) - 1 = 0.
    let result = match_one("automatic");
    assert_match(&result, GOLF_R, 0);
    assert_eq!(result.listing_count, Some(18));
}

#[test]
fn fuel_type_match() {
    assert_match(&match_one("diesel"), AMAROK, 1);
}

#[test]
fn drive_type_match() {
    assert_match(&match_one("rear wheel drive"), TOYOTA_86, 1);
}

#[test]
fn drive_type_abbreviation_is_expanded_before_scoring() {
    assert_match(&match_one("RWD"), TOYOTA_86, 1);
}

#[test]
fn perfect_match() {
    assert_match(&match_one("toyota 86 gt automatic petrol rear wheel drive"), TOYOTA_86, 10);
}

#[test]
fn simple_match() {
    assert_match(&match_one("toyota 86"), TOYOTA_86, 5);
}

#[test]
fn make_and_model_tie_breaks_on_listings() {
    let result = match_one("volkswagen golf");
    assert_match(&result, GOLF_R, 4);
    assert_eq!(result.listing_count, Some(18));
}

#[test]
fn badge_breaks_the_golf_tie() {
    assert_match(&match_one("VW Golf GTI"), GOLF_GTI, 7);
}

#[test]
fn no_match() {
    let result = match_one("unknown make model");
    assert_eq!(result.vehicle_id, None);
    assert_eq!(result.confidence, 0);
    assert_eq!(result.listing_count, None);
}

#[test]
fn input_is_kept_verbatim() {
    let result = match_one("  VW@Golf#R!  ");
    assert_eq!(result.input, "  VW@Golf#R!  ");
    assert_match(&result, GOLF_R, 7);
}

#[test]
fn batch_preserves_order() {
    let matcher = Matcher::new(MatcherConfig::default()).unwrap();
    let catalog = fixture_catalog();
    let results = matcher.match_batch(&catalog, &["volkswagen golf r", "unknown vehicle"]);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].input, "volkswagen golf r");
    assert_match(&results[0], GOLF_R, 7);
    assert_eq!(results[1].input, "unknown vehicle");
    assert_eq!(results[1].vehicle_id, None);
}

#[test]
fn parallel_batch_matches_sequential() {
    let matcher = Matcher::new(MatcherConfig::default()).unwrap();
    let catalog = fixture_catalog();
    let descriptions: Vec<String> = [
        "toyota", "86", "ultimate", "automatic", "diesel", "rear wheel drive",
        "volkswagen golf", "vw golf gti", "nothing here", "",
    ]
    .iter()
    .cycle()
    .take(200)
    .map(|s| s.to_string())
    .collect();

    let sequential = matcher.match_batch(&catalog, &descriptions);
    let parallel = matcher.match_batch_parallel(&catalog, &descriptions);

    assert_eq!(parallel.len(), descriptions.len());
    assert_eq!(sequential, parallel);
    for (result, description) in parallel.iter().zip(&descriptions) {
        assert_eq!(&result.input, description);
    }
}

#[test]
fn abandoned_batch_keeps_earlier_results() {
    let matcher = Matcher::new(MatcherConfig::default()).unwrap();
    let catalog = fixture_catalog();
    let descriptions = ["toyota", "diesel", "volkswagen golf", "ultimate"];

    let partial: Vec<MatchResult> = matcher.match_iter(&catalog, descriptions).take(2).collect();

    assert_eq!(partial.len(), 2);
    assert_match(&partial[0], TOYOTA_86, 3);
    assert_match(&partial[1], AMAROK, 1);
}

#[test]
fn equal_popularity_tie_resolves_to_lowest_id() {
    let mut builder = Catalog::builder();
    for id in ["300", "100", "200"] {
        builder
            .insert(VehicleRecord::new(id).with_make("mazda").with_model("cx-5"))
            .unwrap();
        builder.listing_count(id, 4).unwrap();
    }
    let catalog = builder.build();
    let matcher = Matcher::new(MatcherConfig::default()).unwrap();

    for _ in 0..3 {
        let result = matcher.match_one(&catalog, "Mazda CX-5");
        assert_eq!(result.vehicle_id.as_ref().map(|v| v.as_str()), Some("100"));
        assert_eq!(result.confidence, 4);
    }
}

#[test]
fn vehicles_without_listings_count_as_zero() {
    let mut builder = Catalog::builder();
    builder
        .insert(VehicleRecord::new("a").with_make("subaru"))
        .unwrap()
        .insert(VehicleRecord::new("b").with_make("subaru"))
        .unwrap();
    builder.listing("b");
    let catalog = builder.build();
    let matcher = Matcher::new(MatcherConfig::default()).unwrap();

    let result = matcher.match_one(&catalog, "subaru");
    assert_eq!(result.vehicle_id.as_ref().map(|v| v.as_str()), Some("b"));
    assert_eq!(result.listing_count, Some(1));
    assert_eq!(result.confidence, 2);
}

#[test]
fn empty_catalog_matches_nothing() {
    let matcher = Matcher::new(MatcherConfig::default()).unwrap();
    let results = matcher.match_batch(&Catalog::default(), &["toyota 86"]);
    assert_eq!(results, vec![MatchResult::unmatched("toyota 86")]);
}

#[test]
fn confidence_stays_in_range_for_fixture_inputs() {
    let matcher = Matcher::new(MatcherConfig::default()).unwrap();
    let catalog = fixture_catalog();
    let normalizer = Normalizer::new().unwrap();
    let inputs = [
        "toyota 86 gt automatic petrol rear wheel drive toyota 86 gt",
        "volkswagen volkswagen golf golf r gti",
        "vw amarok tdi580 ultimate quto diesel 4x4",
        "automatic petrol",
    ];
    for input in inputs {
        let result = matcher.match_one(&catalog, input);
        assert!(result.confidence <= 10);
        assert!(result.is_match());
        assert_eq!(normalizer.normalize(&normalizer.normalize(input)), normalizer.normalize(input));
    }
}
