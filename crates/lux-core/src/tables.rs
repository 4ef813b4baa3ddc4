//! The built-in facet tables.
//!
//! Plain data: [`crate::FacetConfig`] turns these into lookup maps and
//! [`crate::FacetConfig::validate`] checks that they agree with each other.
//! The two search-term tables are written out in both directions on purpose,
//! since the backend vocabulary is authored separately from the UI one.

use crate::{
  facet::{
    FacetDefinition, FacetValue, Label, LabelContext, QueryShape, boolean_label,
  },
  fragment::Fragment,
  scope::{Scope, Tab},
  special::{self, SpecialCaseFn},
};

/// `(facet name, search term, idFacet)`
pub type TermRow = (&'static str, &'static str, bool);

/// `(search term, facet name, idFacet)`
pub type FacetRow = (&'static str, &'static str, bool);

// ─── Label functions ─────────────────────────────────────────────────────────

fn yes_no(value: &FacetValue, _: &LabelContext<'_>) -> Option<String> {
  boolean_label(value, "Yes", "No")
}

fn digital_image_selected(value: &FacetValue, _: &LabelContext<'_>) -> Option<String> {
  boolean_label(value, "Has Digital Image", "No Digital Image")
}

fn online_selected(value: &FacetValue, _: &LabelContext<'_>) -> Option<String> {
  boolean_label(value, "Is online", "Not online")
}

fn record_type(value: &FacetValue, ctx: &LabelContext<'_>) -> Option<String> {
  ctx
    .record_types
    .label(ctx.scope, &value.to_text())
    .map(str::to_owned)
}

// ─── Query functions ─────────────────────────────────────────────────────────

/// Units curate collections; an item belongs to a unit either through one of
/// the unit's collections or directly.
fn responsible_units(value: &FacetValue) -> Fragment {
  let id = value.to_text();
  Fragment::field(
    "memberOf",
    Fragment::field(
      "curatedBy",
      Fragment::Or(vec![
        Fragment::field("memberOf", Fragment::id(id.clone())),
        Fragment::id(id),
      ]),
    ),
  )
}

// ─── Facets with their own builders or labels ───────────────────────────────

const fn has_digital_image(name: &'static str, scope: Scope) -> FacetDefinition {
  FacetDefinition {
    name,
    scope,
    section_label: "Has Digital Image",
    facet_label: Some(Label::Computed(yes_no)),
    selected_label: Some(Label::Computed(digital_image_selected)),
    shape: QueryShape::Scalar("hasDigitalImage"),
    id_facet: false,
  }
}

const fn is_online(name: &'static str, scope: Scope) -> FacetDefinition {
  FacetDefinition {
    name,
    scope,
    section_label: "Is Online",
    facet_label: Some(Label::Computed(yes_no)),
    selected_label: Some(Label::Computed(online_selected)),
    shape: QueryShape::Scalar("isOnline"),
    id_facet: false,
  }
}

const fn record_type_facet(
  name: &'static str,
  scope: Scope,
  section_label: &'static str,
) -> FacetDefinition {
  FacetDefinition {
    name,
    scope,
    section_label,
    facet_label: Some(Label::Computed(record_type)),
    selected_label: Some(Label::Computed(record_type)),
    shape: QueryShape::Scalar("recordType"),
    id_facet: false,
  }
}

pub static CUSTOM_FACETS: &[FacetDefinition] = &[
  // item
  has_digital_image("itemHasDigitalImage", Scope::Item),
  is_online("itemIsOnline", Scope::Item),
  record_type_facet("itemRecordType", Scope::Item, "Object Class"),
  FacetDefinition {
    name:           "responsibleCollections",
    scope:          Scope::Item,
    section_label:  "Collection",
    facet_label:    None,
    selected_label: None,
    shape:          QueryShape::Identifier("memberOf"),
    id_facet:       true,
  },
  FacetDefinition {
    name:           "responsibleUnits",
    scope:          Scope::Item,
    section_label:  "Responsible Unit",
    facet_label:    None,
    selected_label: None,
    shape:          QueryShape::Custom(responsible_units),
    id_facet:       true,
  },
  // work
  has_digital_image("workHasDigitalImage", Scope::Work),
  is_online("workIsOnline", Scope::Work),
  record_type_facet("workRecordType", Scope::Work, "Work Class"),
  // set
  has_digital_image("setHasDigitalImage", Scope::Set),
  is_online("setIsOnline", Scope::Set),
  // agent
  has_digital_image("agentHasDigitalImage", Scope::Agent),
  record_type_facet("agentRecordType", Scope::Agent, "Person or Group Class"),
  // concept
  record_type_facet("conceptRecordType", Scope::Concept, "Concept Class"),
  // event
  record_type_facet("eventRecordType", Scope::Event, "Event Class"),
];

// ─── Reverse translators ─────────────────────────────────────────────────────

pub static SPECIAL_CASES: &[(Scope, &str, SpecialCaseFn)] =
  &[(Scope::Item, "memberOf", special::parse_member_of)];

// ─── Facet lists per tab (UI order) ──────────────────────────────────────────

pub static FACET_NAMES_LISTS: &[(Tab, &[&str])] = &[
  (Tab::Objects, &[
    "itemHasDigitalImage",
    "itemIsOnline",
    "itemRecordType",
    "itemTypeId",
    "itemMaterialId",
    "itemEncounteredAgentId",
    "itemEncounteredPlaceId",
    "itemEncounteredDate",
    "itemProductionAgentId",
    "itemProductionPlaceId",
    "itemProductionDate",
    "responsibleUnits",
    "responsibleCollections",
  ]),
  (Tab::Works, &[
    "workHasDigitalImage",
    "workIsOnline",
    "workRecordType",
    "workTypeId",
    "workLanguageId",
    "workAboutItemId",
    "workAboutWorkId",
    "workAboutSetId",
    "workAboutAgentId",
    "workAboutPlaceId",
    "workAboutConceptId",
    "workAboutEventId",
    "workCreationAgentId",
    "workCreationPlaceId",
    "workCreationDate",
    "workPublicationAgentId",
    "workPublicationPlaceId",
    "workPublicationDate",
  ]),
  (Tab::Collections, &[
    "setHasDigitalImage",
    "setIsOnline",
    "setTypeId",
    "setAboutItemId",
    "setAboutWorkId",
    "setAboutSetId",
    "setAboutAgentId",
    "setAboutPlaceId",
    "setAboutConceptId",
    "setAboutEventId",
    "setCreationAgentId",
    "setCreationPlaceId",
    "setCreationDate",
    "setPublicationAgentId",
    "setPublicationPlaceId",
    "setPublicationDate",
    "setCurationAgentId",
    "setPartOfId",
  ]),
  (Tab::People, &[
    "agentHasDigitalImage",
    "agentGenderId",
    "agentNationalityId",
    "agentRecordType",
    "agentTypeId",
    "agentStartPlaceId",
    "agentStartDate",
    "agentEndPlaceId",
    "agentEndDate",
    "agentOccupationId",
    "agentActivePlaceId",
    "agentActiveDate",
    "agentMemberOfId",
    "agentProfessionalActivityId",
  ]),
  (Tab::Places, &["placeTypeId", "placePartOfId"]),
  (Tab::Concepts, &[
    "conceptRecordType",
    "conceptTypeId",
    "conceptPartOfId",
    "conceptInfluencedByAgentId",
    "conceptInfluencedByConceptId",
    "conceptInfluencedByEventId",
    "conceptInfluencedByPlaceId",
  ]),
  (Tab::Events, &[
    "eventRecordType",
    "eventTypeId",
    "eventPlaceId",
    "eventAgentId",
    "eventStartDate",
    "eventEndDate",
  ]),
];

// ─── Labels ──────────────────────────────────────────────────────────────────

pub static FACET_LABELS: &[(&str, &str)] = &[
  ("agentHasDigitalImage", "Has Digital Image"),
  ("agentGenderId", "Gender"),
  ("agentNationalityId", "Nationality"),
  ("agentStartPlaceId", "Born/Formed At"),
  ("agentEndPlaceId", "Died/Dissolved At"),
  ("agentStartDate", "Born/Formed Date"),
  ("agentEndDate", "Died/Dissolved Date"),
  ("agentActiveDate", "Professionally Active Date"),
  ("agentOccupationId", "Occupation/Role"),
  ("agentActivePlaceId", "Professionally Active At"),
  ("agentMemberOfId", "Member Of"),
  ("agentProfessionalActivityId", "Professional Activity Categorized As"),
  ("agentRecordType", "Person or Group Class"),
  ("agentTypeId", "Categorized As"),
  ("conceptInfluencedByAgentId", "Influenced by Person & Group"),
  ("conceptInfluencedByConceptId", "Influenced by Concept"),
  ("conceptInfluencedByEventId", "Influenced by Event"),
  ("conceptInfluencedByPlaceId", "Influenced by Place"),
  ("conceptPartOfId", "Part Of"),
  ("conceptRecordType", "Concept Class"),
  ("conceptTypeId", "Categorized As"),
  ("eventAgentId", "Carried Out By"),
  ("eventEndDate", "End Date"),
  ("eventPlaceId", "Took Place At"),
  ("eventStartDate", "Start Date"),
  ("eventTypeId", "Categorized As"),
  ("eventRecordType", "Event Class"),
  ("itemHasDigitalImage", "Has Digital Image"),
  ("itemIsOnline", "Is Online"),
  ("itemTypeId", "Categorized As"),
  ("itemMaterialId", "Materials"),
  ("itemEncounteredPlaceId", "Encountered At"),
  ("itemEncounteredAgentId", "Encountered By"),
  ("itemEncounteredDate", "Encounter Date"),
  ("itemProductionDate", "Creation Date"),
  ("itemProductionPlaceId", "Created At"),
  ("itemProductionAgentId", "Created By"),
  ("itemRecordType", "Object Class"),
  ("placePartOfId", "Part Of"),
  ("placeTypeId", "Categorized As"),
  ("responsibleCollections", "Collection"),
  ("responsibleUnits", "Responsible Unit"),
  ("setAboutAgentId", "About People & Groups"),
  ("setAboutConceptId", "About Concept"),
  ("setAboutEventId", "About Event"),
  ("setAboutItemId", "About Object"),
  ("setAboutPlaceId", "About Place"),
  ("setAboutSetId", "About Collection"),
  ("setAboutWorkId", "About Work"),
  ("setCreationAgentId", "Created By"),
  ("setCreationDate", "Creation Date"),
  ("setCreationPlaceId", "Created At"),
  ("setCurationAgentId", "Curated By"),
  ("setHasDigitalImage", "Has Digital Image"),
  ("setIsOnline", "Is Online"),
  ("setPartOfId", "Part Of"),
  ("setPublicationAgentId", "Published By"),
  ("setPublicationPlaceId", "Published At"),
  ("setPublicationDate", "Published Date"),
  ("setTypeId", "Categorized As"),
  ("workHasDigitalImage", "Has Digital Image"),
  ("workIsOnline", "Is Online"),
  ("workTypeId", "Categorized As"),
  ("workAboutItemId", "About Object"),
  ("workAboutWorkId", "About Work"),
  ("workAboutSetId", "About Collection"),
  ("workAboutAgentId", "About People & Groups"),
  ("workPublicationAgentId", "Published By"),
  ("workCreationAgentId", "Created By"),
  ("workAboutPlaceId", "About Place"),
  ("workPublicationPlaceId", "Published At"),
  ("workCreationPlaceId", "Created At"),
  ("workAboutConceptId", "About Concept"),
  ("workAboutEventId", "About Event"),
  ("workPublicationDate", "Published Date"),
  ("workCreationDate", "Created Date"),
  ("workLanguageId", "Language"),
  ("workRecordType", "Work Class"),
];

pub static SELECTED_DATE_FACET_LABELS: &[(&str, &str)] = &[
  ("agentStartDate", "Born/Formed in"),
  ("agentEndDate", "Died/Dissolved in"),
  ("agentActiveDate", "Professionally Active in"),
  ("eventEndDate", "Ended in"),
  ("eventStartDate", "Started in"),
  ("itemEncounteredDate", "Encountered in"),
  ("itemProductionDate", "Created in"),
  ("setCreationDate", "Created in"),
  ("setPublicationDate", "Published in"),
  ("workPublicationDate", "Published in"),
  ("workCreationDate", "Created in"),
];

pub static BOOLEAN_FACET_NAMES: &[&str] = &[
  "itemIsOnline",
  "workIsOnline",
  "setIsOnline",
  "itemHasDigitalImage",
  "workHasDigitalImage",
  "setHasDigitalImage",
  "agentHasDigitalImage",
];

// ─── Facet → search term ─────────────────────────────────────────────────────

pub static FACET_SEARCH_TERMS: &[(Scope, &[TermRow])] = &[
  (Scope::Item, &[
    ("itemHasDigitalImage", "hasDigitalImage", false),
    ("itemIsOnline", "isOnline", false),
    ("itemTypeId", "classification", true),
    ("itemMaterialId", "material", true),
    ("itemEncounteredDate", "encounteredDate", false),
    ("itemEncounteredAgentId", "encounteredBy", true),
    ("itemEncounteredPlaceId", "encounteredAt", true),
    ("itemProductionPlaceId", "producedAt", true),
    ("itemProductionAgentId", "producedBy", true),
    ("itemProductionDate", "producedDate", false),
    ("itemRecordType", "recordType", false),
  ]),
  (Scope::Work, &[
    ("workHasDigitalImage", "hasDigitalImage", false),
    ("workIsOnline", "isOnline", false),
    ("workTypeId", "classification", true),
    ("workAboutItemId", "aboutItem", true),
    ("workAboutWorkId", "aboutWork", true),
    ("workAboutSetId", "aboutSet", true),
    ("workAboutAgentId", "aboutAgent", true),
    ("workPublicationAgentId", "publishedBy", true),
    ("workCreationAgentId", "createdBy", true),
    ("workAboutPlaceId", "aboutPlace", true),
    ("workPublicationPlaceId", "publishedAt", true),
    ("workCreationPlaceId", "createdAt", true),
    ("workAboutConceptId", "aboutConcept", true),
    ("workAboutEventId", "aboutEvent", true),
    ("workPublicationDate", "publishedDate", false),
    ("workCreationDate", "createdDate", false),
    ("workLanguageId", "language", true),
    ("workRecordType", "recordType", false),
  ]),
  (Scope::Set, &[
    ("setAboutAgentId", "aboutAgent", true),
    ("setAboutConceptId", "aboutConcept", true),
    ("setAboutEventId", "aboutEvent", true),
    ("setAboutItemId", "aboutItem", true),
    ("setAboutPlaceId", "aboutPlace", true),
    ("setAboutSetId", "aboutSet", true),
    ("setAboutWorkId", "aboutWork", true),
    ("setCreationAgentId", "createdBy", true),
    ("setCreationDate", "createdDate", false),
    ("setCreationPlaceId", "createdAt", true),
    ("setCurationAgentId", "curatedBy", true),
    ("setHasDigitalImage", "hasDigitalImage", false),
    ("setIsOnline", "isOnline", false),
    ("setPartOfId", "partOf", true),
    ("setPublicationAgentId", "publishedBy", true),
    ("setPublicationPlaceId", "publishedAt", true),
    ("setPublicationDate", "publishedDate", false),
    ("setTypeId", "classification", true),
  ]),
  (Scope::Agent, &[
    ("agentHasDigitalImage", "hasDigitalImage", false),
    ("agentGenderId", "gender", true),
    ("agentNationalityId", "nationality", true),
    ("agentStartPlaceId", "startAt", true),
    ("agentEndPlaceId", "endAt", true),
    ("agentStartDate", "startDate", false),
    ("agentEndDate", "endDate", false),
    ("agentActiveDate", "activeDate", false),
    ("agentOccupationId", "occupation", true),
    ("agentActivePlaceId", "activeAt", true),
    ("agentMemberOfId", "memberOf", true),
    ("agentProfessionalActivityId", "professionalActivity", true),
    ("agentTypeId", "classification", true),
    ("agentRecordType", "recordType", false),
  ]),
  (Scope::Place, &[
    ("placeTypeId", "classification", true),
    ("placePartOfId", "partOf", true),
  ]),
  (Scope::Concept, &[
    ("conceptInfluencedByAgentId", "influencedByAgent", true),
    ("conceptInfluencedByConceptId", "influencedByConcept", true),
    ("conceptInfluencedByEventId", "influencedByEvent", true),
    ("conceptInfluencedByPlaceId", "influencedByPlace", true),
    ("conceptTypeId", "classification", true),
    ("conceptPartOfId", "broader", true),
    ("conceptRecordType", "recordType", false),
  ]),
  (Scope::Event, &[
    ("eventStartDate", "startDate", false),
    ("eventEndDate", "endDate", false),
    ("eventTypeId", "classification", true),
    ("eventPlaceId", "tookPlaceAt", true),
    ("eventAgentId", "carriedOutBy", true),
    ("eventRecordType", "recordType", false),
  ]),
];

// ─── Search term → facet ─────────────────────────────────────────────────────

pub static SEARCH_TERM_FACETS: &[(Scope, &[FacetRow])] = &[
  (Scope::Item, &[
    ("classification", "itemTypeId", true),
    ("encounteredBy", "itemEncounteredAgentId", true),
    ("encounteredAt", "itemEncounteredPlaceId", true),
    ("encounteredDate", "itemEncounteredDate", false),
    ("hasDigitalImage", "itemHasDigitalImage", false),
    ("isOnline", "itemIsOnline", false),
    ("material", "itemMaterialId", true),
    ("producedAt", "itemProductionPlaceId", true),
    ("producedBy", "itemProductionAgentId", true),
    ("producedDate", "itemProductionDate", false),
    ("recordType", "itemRecordType", false),
  ]),
  (Scope::Work, &[
    ("hasDigitalImage", "workHasDigitalImage", false),
    ("isOnline", "workIsOnline", false),
    ("classification", "workTypeId", true),
    ("aboutItem", "workAboutItemId", true),
    ("aboutWork", "workAboutWorkId", true),
    ("aboutSet", "workAboutSetId", true),
    ("aboutAgent", "workAboutAgentId", true),
    ("publishedBy", "workPublicationAgentId", true),
    ("createdBy", "workCreationAgentId", true),
    ("aboutPlace", "workAboutPlaceId", true),
    ("publishedAt", "workPublicationPlaceId", true),
    ("createdAt", "workCreationPlaceId", true),
    ("aboutConcept", "workAboutConceptId", true),
    ("aboutEvent", "workAboutEventId", true),
    ("publishedDate", "workPublicationDate", false),
    ("createdDate", "workCreationDate", false),
    ("language", "workLanguageId", true),
    ("recordType", "workRecordType", false),
  ]),
  (Scope::Set, &[
    ("aboutAgent", "setAboutAgentId", true),
    ("aboutConcept", "setAboutConceptId", true),
    ("aboutEvent", "setAboutEventId", true),
    ("aboutItem", "setAboutItemId", true),
    ("aboutPlace", "setAboutPlaceId", true),
    ("aboutSet", "setAboutSetId", true),
    ("aboutWork", "setAboutWorkId", true),
    ("createdBy", "setCreationAgentId", true),
    ("createdDate", "setCreationDate", false),
    ("createdAt", "setCreationPlaceId", true),
    ("curatedBy", "setCurationAgentId", true),
    ("hasDigitalImage", "setHasDigitalImage", false),
    ("isOnline", "setIsOnline", false),
    ("partOf", "setPartOfId", true),
    ("publishedBy", "setPublicationAgentId", true),
    ("publishedAt", "setPublicationPlaceId", true),
    ("publishedDate", "setPublicationDate", false),
    ("classification", "setTypeId", true),
  ]),
  (Scope::Agent, &[
    ("hasDigitalImage", "agentHasDigitalImage", false),
    ("gender", "agentGenderId", true),
    ("nationality", "agentNationalityId", true),
    ("startAt", "agentStartPlaceId", true),
    ("endAt", "agentEndPlaceId", true),
    ("startDate", "agentStartDate", false),
    ("endDate", "agentEndDate", false),
    ("activeDate", "agentActiveDate", false),
    ("occupation", "agentOccupationId", true),
    ("activeAt", "agentActivePlaceId", true),
    ("memberOf", "agentMemberOfId", true),
    ("classification", "agentTypeId", true),
    ("professionalActivity", "agentProfessionalActivityId", true),
    ("recordType", "agentRecordType", false),
  ]),
  (Scope::Place, &[
    ("classification", "placeTypeId", true),
    ("partOf", "placePartOfId", true),
  ]),
  (Scope::Concept, &[
    ("classification", "conceptTypeId", true),
    ("broader", "conceptPartOfId", true),
    ("influencedByAgent", "conceptInfluencedByAgentId", true),
    ("influencedByConcept", "conceptInfluencedByConceptId", true),
    ("influencedByEvent", "conceptInfluencedByEventId", true),
    ("influencedByPlace", "conceptInfluencedByPlaceId", true),
    ("recordType", "conceptRecordType", false),
  ]),
  (Scope::Event, &[
    ("classification", "eventTypeId", true),
    ("tookPlaceAt", "eventPlaceId", true),
    ("carriedOutBy", "eventAgentId", true),
    ("recordType", "eventRecordType", false),
    ("startDate", "eventStartDate", false),
    ("endDate", "eventEndDate", false),
  ]),
];

// ─── Record types ────────────────────────────────────────────────────────────

/// Default `recordTypes[scope][code]` display names; deployments may extend
/// or override them through configuration.
pub static DEFAULT_RECORD_TYPES: &[(Scope, &[(&str, &str)])] = &[
  (Scope::Item, &[
    ("HumanMadeObject", "Physical Object"),
    ("DigitalObject", "Digital Object"),
  ]),
  (Scope::Work, &[
    ("LinguisticObject", "Text"),
    ("VisualItem", "Image"),
  ]),
  (Scope::Agent, &[("Person", "Person"), ("Group", "Group")]),
  (Scope::Concept, &[
    ("Type", "General Concept"),
    ("Material", "Material"),
    ("Language", "Language"),
    ("Currency", "Currency"),
    ("MeasurementUnit", "Measurement Unit"),
  ]),
  (Scope::Event, &[("Activity", "Activity"), ("Period", "Period")]),
];
