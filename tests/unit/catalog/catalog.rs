use super::*;

#[test]
fn builtin_catalog_loads() {
    let c = Catalog::builtin().unwrap();
    assert_eq!(c.products().len(), 6);
    let tee = c.by_id("tshirt-1").unwrap();
    assert_eq!(tee.name, "Classic Black Tee");
    assert_eq!(tee.default_size(), "S");
    assert!(tee.is_customizable && tee.is_virtual_try_on);
    assert!(c.by_id("missing").is_none());
}

#[test]
fn flag_and_category_filters() {
    let c = Catalog::builtin().unwrap();
    let ids = |v: Vec<&Product>| v.into_iter().map(|p| p.id.clone()).collect::<Vec<_>>();

    assert_eq!(ids(c.by_category(Category::Dress)), ["dress-1", "dress-2"]);
    assert_eq!(
        ids(c.customizable()),
        ["tshirt-1", "tshirt-2", "tshirt-4"]
    );
    assert_eq!(
        ids(c.virtual_try_on()),
        ["tshirt-1", "tshirt-2", "tshirt-3", "tshirt-4"]
    );
}

#[test]
fn featured_is_deterministic_and_bounded() {
    let c = Catalog::builtin().unwrap();
    let a: Vec<_> = c.featured(3).iter().map(|p| p.id.as_str()).collect();
    assert_eq!(a, ["tshirt-1", "tshirt-2", "tshirt-3"]);
    assert_eq!(c.featured(100).len(), 6);
    assert!(c.featured(0).is_empty());
}

#[test]
fn optional_flags_default_to_false() {
    let json = r#"[{"id":"x","name":"X","price":1.0,"description":"","category":"dress",
        "images":[],"sizes":["M"]}]"#;
    let c = Catalog::from_json(json).unwrap();
    let p = c.by_id("x").unwrap();
    assert!(!p.is_customizable && !p.is_virtual_try_on);
    assert_eq!(p.primary_image(), None);
}

#[test]
fn invalid_catalogs_are_rejected() {
    let dup = r#"[
        {"id":"a","name":"A","price":1.0,"description":"","category":"dress","images":[],"sizes":["M"]},
        {"id":"a","name":"B","price":1.0,"description":"","category":"dress","images":[],"sizes":["M"]}
    ]"#;
    assert!(matches!(Catalog::from_json(dup), Err(DrapeError::Validation(_))));

    let no_sizes =
        r#"[{"id":"a","name":"A","price":1.0,"description":"","category":"dress","images":[],"sizes":[]}]"#;
    assert!(Catalog::from_json(no_sizes).is_err());

    assert!(matches!(
        Catalog::from_json(r#"[{"id":"a"}]"#),
        Err(DrapeError::Serde(_))
    ));
}

#[test]
fn category_parses_case_insensitively() {
    assert_eq!("TShirt".parse::<Category>().unwrap(), Category::Tshirt);
    assert!("hat".parse::<Category>().is_err());
}
