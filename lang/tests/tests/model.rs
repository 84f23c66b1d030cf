use penman_driver::PenmanCodec;
use penman_model::Model;
use penman_syntax::*;
use penman_tests::*;
use pretty_assertions::assert_eq;

const ROLES: &[&str] = &[
    ":ARG0", ":ARG0-of", ":ARG0-of-of", ":mod", ":mod-of", ":domain-of", ":consist-of", ":op12", ":foo",
    "ARG1", "/",
];

#[test]
fn inversion_is_an_involution() {
    for model in [amr().model, Model::default()] {
        // a doubled suffix only loses one `-of` per toggle
        for role in ROLES.iter().filter(|role| !role.ends_with("-of-of")) {
            assert_eq!(model.invert_role(&model.invert_role(role)), *role);
            let triple = Triple::new("a", *role, "b");
            assert_eq!(model.invert(&model.invert(&triple).unwrap()).unwrap(), triple);
        }
    }
    assert!(Model::default().invert(&Triple::missing("a", ":polarity")).is_err());
}

#[test]
fn canonicalization_is_idempotent() {
    for model in [amr().model, Model::default()] {
        for role in ROLES {
            let once = model.canonicalize_role(role);
            assert_eq!(model.canonicalize_role(&once), once, "{role}");
        }
    }
    let model = amr().model;
    assert_eq!(model.canonicalize_role(":mod-of"), ":domain");
    assert_eq!(model.canonicalize_role("ARG1"), ":ARG1");
    assert_eq!(model.canonicalize_role(":ARG0-of-of"), ":ARG0");
}

#[test]
fn structural_errors() {
    let model = amr().model;
    let graph = PenmanCodec::default().decode("(a / alpha :ARG0 (b / beta) :foo 1)").unwrap();
    let errors = model.errors(&graph);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[&Some(Triple::new("a", ":foo", "1"))], vec!["invalid role".to_string()]);

    let graph = Graph::new(vec![
        Triple::new("a", CONCEPT_ROLE, "alpha"),
        Triple::new("b", CONCEPT_ROLE, "beta"),
    ]);
    let errors = model.errors(&graph);
    assert_eq!(errors[&Some(Triple::new("b", CONCEPT_ROLE, "beta"))], vec!["unreachable".to_string()]);
    assert!(!errors.contains_key(&Some(Triple::new("a", CONCEPT_ROLE, "alpha"))));

    let errors = model.errors(&Graph::default());
    assert_eq!(errors[&None], vec!["graph is empty".to_string()]);
}
