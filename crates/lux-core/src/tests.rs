//! Table invariants and registry behaviour against the built-in tables and
//! small broken fixtures.

use serde_json::json;
use strum::IntoEnumIterator;

use crate::{
  ConfigError, FacetConfig, FacetTables, FacetValue, RecordTypes, Scope, Tab,
  facet::QueryShape,
  special::{self, RESPONSIBLE_UNITS},
  tables::{FacetRow, TermRow},
};

fn config() -> &'static FacetConfig { FacetConfig::global() }

// ─── Table invariants ────────────────────────────────────────────────────────

#[test]
fn standard_tables_have_no_problems() {
  assert_eq!(config().problems(), Vec::<ConfigError>::new());
  assert!(config().validate().is_ok());
}

#[test]
fn mapping_tables_are_inverses_in_every_scope() {
  for tab in Tab::iter() {
    let scope = tab.scope();
    for name in config().facet_names(tab) {
      let Some(term) = config().search_term(scope, name) else {
        continue;
      };
      let back = config()
        .facet_for_term(scope, term.search_term_name)
        .unwrap_or_else(|| panic!("{scope}: {} has no facet", term.search_term_name));
      assert_eq!(back.facet_name, *name, "{scope}");
      assert_eq!(back.id_facet, term.id_facet, "{scope}: {name}");
    }
  }
}

#[test]
fn every_listed_facet_is_registered_in_its_scope() {
  for tab in Tab::iter() {
    for name in config().facet_names(tab) {
      let def = config()
        .facet(tab.scope(), name)
        .unwrap_or_else(|| panic!("{tab}: {name} is not registered"));
      assert_eq!(def.scope, tab.scope());
      assert!(config().facet_label(name).is_some(), "{name} has no label");
    }
  }
}

#[test]
fn id_flags_agree_between_registry_and_tables() {
  for scope in Scope::iter() {
    for def in config().tab_facets(scope.tab()) {
      if let Some(term) = config().search_term(scope, def.name) {
        assert_eq!(term.id_facet, def.id_facet, "{}", def.name);
      }
    }
  }
}

// ─── Broken fixtures ─────────────────────────────────────────────────────────

static BROKEN_TERMS: &[(Scope, &[TermRow])] = &[(Scope::Place, &[
  ("placeTypeId", "classification", true),
  ("placePartOfId", "partOf", false),
])];

static BROKEN_FACETS: &[(Scope, &[FacetRow])] = &[(Scope::Place, &[
  ("classification", "placeTypeId", true),
  ("partOf", "placePartOfId", true),
  ("broader", "placeBroaderId", true),
])];

static BROKEN_LISTS: &[(Tab, &[&str])] = &[(Tab::Places, &[
  "placeTypeId",
  "placePartOfId",
  "placeMissingId",
])];

#[test]
fn validate_reports_every_broken_table_entry() {
  let tables = FacetTables {
    custom_facets: &[],
    facet_search_terms: BROKEN_TERMS,
    search_term_facets: BROKEN_FACETS,
    facet_names_lists: BROKEN_LISTS,
    special_cases: &[],
    ..FacetTables::standard()
  };
  let config = FacetConfig::from_tables(tables, RecordTypes::default());

  let problems = config.problems();
  assert_eq!(problems.len(), 3, "{problems:?}");
  assert!(problems.contains(&ConfigError::IdFacetMismatch {
    scope: Scope::Place,
    facet: "placePartOfId",
  }));
  assert!(problems.contains(&ConfigError::TermNotInverse {
    scope: Scope::Place,
    term:  "broader",
    facet: "placeBroaderId",
  }));
  assert!(problems.contains(&ConfigError::Unregistered {
    tab:   Tab::Places,
    facet: "placeMissingId",
  }));

  let err = config.validate().unwrap_err().to_string();
  assert!(err.starts_with("3 configuration problem(s)"), "{err}");
}

#[test]
fn facet_missing_from_its_list_is_reported() {
  let tables = FacetTables {
    facet_names_lists: &[],
    ..FacetTables::standard()
  };
  let config = FacetConfig::from_tables(tables, RecordTypes::standard());
  assert!(config.problems().contains(&ConfigError::NotListed {
    scope: Scope::Item,
    tab:   Tab::Objects,
    facet: "itemIsOnline",
  }));
}

// ─── Registry ────────────────────────────────────────────────────────────────

#[test]
fn is_online_builds_a_scalar_clause() {
  let q = config()
    .build_query(Scope::Item, "itemIsOnline", &FacetValue::Number(1))
    .unwrap();
  assert_eq!(q.to_json(), json!({ "isOnline": 1 }));
}

#[test]
fn unknown_facet_builds_nothing() {
  assert!(config()
    .build_query(Scope::Work, "itemIsOnline", &FacetValue::Number(1))
    .is_none());
}

#[test]
fn boolean_facets_render_yes_and_no() {
  let def = config().facet(Scope::Item, "itemIsOnline").unwrap();
  let types = config().record_types();
  assert_eq!(def.facet_label(&FacetValue::Number(1), types).as_deref(), Some("Yes"));
  assert_eq!(def.facet_label(&FacetValue::Number(0), types).as_deref(), Some("No"));
  assert_eq!(def.facet_label(&FacetValue::Number(7), types), None);
  assert_eq!(def.selected_label(&FacetValue::Number(1), types).as_deref(), Some("Is online"));
  assert_eq!(def.selected_label(&FacetValue::Number(0), types).as_deref(), Some("Not online"));

  let def = config().facet(Scope::Set, "setHasDigitalImage").unwrap();
  assert_eq!(
    def.selected_label(&FacetValue::Number(0), types).as_deref(),
    Some("No Digital Image")
  );
  assert!(config().is_boolean_facet("setHasDigitalImage"));
  assert!(!config().is_boolean_facet("setTypeId"));
}

#[test]
fn record_type_labels_come_from_the_injected_table() {
  let def = config().facet(Scope::Item, "itemRecordType").unwrap();
  let types = config().record_types();
  assert_eq!(
    def.facet_label(&"HumanMadeObject".into(), types).as_deref(),
    Some("Physical Object")
  );
  assert_eq!(def.facet_label(&"Nonsense".into(), types), None);

  let mut overrides = RecordTypes::default();
  overrides.extend(
    serde_json::from_value(json!({ "item": { "Nonsense": "Curiosity" } }))
      .unwrap(),
  );
  let mut types = RecordTypes::standard();
  types.extend(overrides);
  let custom = FacetConfig::standard().with_record_types(types);
  let def = custom.facet(Scope::Item, "itemRecordType").unwrap();
  assert_eq!(
    def.facet_label(&"Nonsense".into(), custom.record_types()).as_deref(),
    Some("Curiosity")
  );
  assert_eq!(
    def.facet_label(&"HumanMadeObject".into(), custom.record_types()).as_deref(),
    Some("Physical Object")
  );
}

#[test]
fn derived_definitions_follow_their_search_terms() {
  let material = config().facet(Scope::Item, "itemMaterialId").unwrap();
  assert!(matches!(material.shape, QueryShape::Identifier("material")));
  assert_eq!(material.section_label, "Materials");

  let produced = config().facet(Scope::Item, "itemProductionDate").unwrap();
  assert!(matches!(produced.shape, QueryShape::Date("producedDate")));
  assert_eq!(
    config().selected_date_facet_label("itemProductionDate"),
    Some("Created in")
  );

  let q = produced.build_query(&FacetValue::from("1950-01-01T00:00:00.000Z"));
  assert_eq!(q.to_json(), json!({ "producedDate": "1950-01-01T00:00:00.000Z" }));
}

#[test]
fn responsible_units_round_trip_through_the_member_of_parser() {
  let q = config()
    .build_query(Scope::Item, RESPONSIBLE_UNITS, &"urn:unit".into())
    .unwrap();
  assert_eq!(
    q.to_json(),
    json!({ "memberOf": { "curatedBy": { "OR": [
      { "memberOf": { "id": "urn:unit" } },
      { "id": "urn:unit" },
    ] } } })
  );

  let parse = config().special_case(Scope::Item, "memberOf").unwrap();
  let hits = parse(&q).unwrap();
  assert_eq!(hits, vec![crate::FacetHit::new(RESPONSIBLE_UNITS, "urn:unit")]);
}

#[test]
fn responsible_collections_is_an_id_under_member_of() {
  let q = config()
    .build_query(
      Scope::Item,
      special::RESPONSIBLE_COLLECTIONS,
      &"urn:collection".into(),
    )
    .unwrap();
  assert_eq!(q.to_json(), json!({ "memberOf": { "id": "urn:collection" } }));
}

#[test]
fn find_facet_searches_every_scope() {
  assert_eq!(
    config().find_facet("eventStartDate").map(|d| d.scope),
    Some(Scope::Event)
  );
  assert!(config().find_facet("nope").is_none());
  assert!(config().special_case(Scope::Work, "memberOf").is_none());
}
