//! End-to-end conversion scenarios.
//!
//! Each test feeds a small STEP snippet through `convert_text` and checks the
//! stanzas read back from the Turtle output.

use ifcbot_core::prelude::*;

fn convert(text: &str) -> String {
    convert_text(&TypeRegistry::bot(), &ConvertConfig::default(), text)
        .unwrap()
        .turtle
}

fn pairs_of(ttl: &str, subject: &str) -> Vec<(String, String)> {
    read_stanzas(ttl)
        .unwrap()
        .into_iter()
        .find(|s| s.subject == subject)
        .map(|s| s.pairs)
        .unwrap_or_default()
}

fn pair(p: &str, o: &str) -> (String, String) {
    (p.to_string(), o.to_string())
}

#[test]
fn building_contains_storey() {
    let ttl = convert(
        "#10 = IFCBUILDING('G1','Main');\n\
         #20 = IFCBUILDINGSTOREY('G2','L1');\n\
         #30 = IFCRELAGGREGATES('X',$,$,$,#10,(#20));\n",
    );

    assert_eq!(
        pairs_of(&ttl, "ex:inst_10"),
        vec![
            pair("rdf:type", "bot:Building"),
            pair("rdfs:label", "\"Main\""),
            pair("bot:containsZone", "ex:inst_20"),
        ]
    );
    assert_eq!(
        pairs_of(&ttl, "ex:inst_20"),
        vec![pair("rdf:type", "bot:Storey"), pair("rdfs:label", "\"L1\"")]
    );
    assert!(ttl.starts_with("@prefix rdf:  <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .\n"));
}

#[test]
fn connection_with_two_children_is_symmetric() {
    let ttl = convert(
        "#1=IFCWALL('a','Wall A');\n\
         #2=IFCSLAB('b','Slab B');\n\
         #9=IFCRELCONNECTSELEMENTS('c',#7,#1,#2);\n",
    );
    assert!(pairs_of(&ttl, "ex:inst_1").contains(&pair("bot:adjacentElement", "ex:inst_2")));
    assert!(pairs_of(&ttl, "ex:inst_2").contains(&pair("bot:adjacentElement", "ex:inst_1")));
}

#[test]
fn connection_with_three_children_produces_nothing() {
    let ttl = convert(
        "#1=IFCWALL('a','Wall A');\n\
         #2=IFCSLAB('b','Slab B');\n\
         #3=IFCBEAM('c','Beam C');\n\
         #9=IFCRELCONNECTSELEMENTS('c',#7,#1,#2,#3);\n",
    );
    assert!(!ttl.contains("bot:adjacentElement"));
}

#[test]
fn interference_uses_intersecting_element() {
    let ttl = convert(
        "#1=IFCCOLUMN('a','C1');\n\
         #2=IFCBEAM('b','B1');\n\
         #9=IFCRELINTERFERESELEMENTS('x',#8,#1,#2);\n",
    );
    assert_eq!(ttl.matches("bot:intersectingElement").count(), 2);
}

#[test]
fn reference_to_excluded_type_produces_no_triple() {
    let ttl = convert(
        "#10=IFCBUILDING('G1','Main');\n\
         #11=IFCCARTESIANPOINT((0.,0.,0.));\n\
         #30=IFCRELAGGREGATES('X',$,$,$,#10,(#11));\n\
         #31=IFCRELCONTAINEDINSPATIALSTRUCTURE('Y',$,$,$,#10,(#404));\n",
    );
    assert!(!ttl.contains("ex:inst_11"));
    assert!(!ttl.contains("ex:inst_404"));
    assert!(!ttl.contains("bot:containsZone"));
    assert!(!ttl.contains("bot:containsElement"));
}

#[test]
fn mixed_aggregation_produces_nothing() {
    let ttl = convert(
        "#10=IFCBUILDINGSTOREY('G1','L1');\n\
         #11=IFCWALL('G2','W');\n\
         #30=IFCRELAGGREGATES('X',$,$,$,#10,(#11));\n\
         #31=IFCRELAGGREGATES('Y',$,$,$,#11,(#10));\n",
    );
    assert!(!ttl.contains("bot:containsZone"));
    assert!(!ttl.contains("bot:hasSubElement"));
}

#[test]
fn root_project_is_never_typed() {
    let ttl = convert(
        "#1=IFCPROJECT('P','Project');\n\
         #10=IFCSITE('S','Site');\n\
         #30=IFCRELAGGREGATES('X',$,$,$,#1,(#10));\n",
    );
    assert!(pairs_of(&ttl, "ex:inst_1").is_empty());
    assert_eq!(
        pairs_of(&ttl, "ex:inst_10"),
        vec![pair("rdf:type", "bot:Site"), pair("rdfs:label", "\"Site\"")]
    );
}

#[test]
fn names_with_quotes_are_escaped() {
    let ttl = convert("#5=IFCDOOR('D','Door \"Main\"');");
    assert!(ttl.contains(r#"rdfs:label "Door \"Main\"" ."#));
}

#[test]
fn duplicate_relations_are_not_deduplicated() {
    let ttl = convert(
        "#10=IFCBUILDING('G1','');\n\
         #20=IFCBUILDINGSTOREY('G2','');\n\
         #30=IFCRELAGGREGATES('X',$,$,$,#10,(#20));\n\
         #31=IFCRELAGGREGATES('Y',$,$,$,#10,(#20));\n",
    );
    assert_eq!(ttl.matches("bot:containsZone ex:inst_20").count(), 2);
}

#[test]
fn registry_extension_is_configuration_only() {
    let registry = TypeRegistry::bot()
        .to_builder()
        .with_element_type("IFCRAILING")
        .with_zone_type("IFCZONE", ZoneClass::Space)
        .build()
        .unwrap();
    let report = convert_text(
        &registry,
        &ConvertConfig::default(),
        "#1=IFCRAILING('r','Rail');#2=IFCZONE('z','Zone');",
    )
    .unwrap();
    assert!(report.turtle.contains("ex:inst_1\n    rdf:type bot:Element"));
    assert!(report.turtle.contains("ex:inst_2\n    rdf:type bot:Space"));
}

#[test]
fn custom_instance_namespace() {
    let mut cfg = ConvertConfig::default();
    cfg.namespaces.instances = "https://data.example.org/bldg/".to_string();
    cfg.namespaces.instance_prefix = "e".to_string();
    let report = convert_text(&TypeRegistry::bot(), &cfg, "#5=IFCWALL('W','Wall');").unwrap();
    assert!(report
        .turtle
        .contains("@prefix ex:   <https://data.example.org/bldg/> ."));
    assert!(report.turtle.contains("\nex:e5\n"));
}

#[test]
fn overflowing_parent_reference_produces_nothing() {
    let ttl = convert(
        "#10 = IFCBUILDING('G1','Main');\n\
         #20 = IFCBUILDINGSTOREY('G2','L1');\n\
         #30 = IFCSPACE('G3','Room');\n\
         #40 = IFCRELAGGREGATES('X',$,$,$,#99999999999999999999999,(#20,#30));\n",
    );
    assert!(!ttl.contains("bot:containsZone"));
    assert_eq!(
        pairs_of(&ttl, "ex:inst_20"),
        vec![pair("rdf:type", "bot:Storey"), pair("rdfs:label", "\"L1\"")]
    );
}

#[test]
fn multi_line_names_stay_on_one_line() {
    let ttl = convert("#5=IFCWALL('W','Line1\nLine2 \\ end');");
    assert_eq!(
        pairs_of(&ttl, "ex:inst_5"),
        vec![
            pair("rdf:type", "bot:Element"),
            pair("rdfs:label", r#""Line1\nLine2 \\ end""#),
        ]
    );
}
