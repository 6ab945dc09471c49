//! End-to-end registration and dispatch coverage over the public surface.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use switchboard_core::{App, DispatchError, parse_usage};

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// Build the demo app and capture every handler call as (command, values).
fn demo_app() -> (App, Rc<RefCell<Vec<(String, Vec<Value>)>>>) {
    let calls: Rc<RefCell<Vec<(String, Vec<Value>)>>> = Rc::new(RefCell::new(Vec::new()));
    let mut app = App::new();

    let sink = Rc::clone(&calls);
    app.command("hello <name:string>", move |args| {
        sink.borrow_mut().push(("hello".to_string(), args.to_vec()));
    });

    let sink = Rc::clone(&calls);
    app.command("goodbye <name:string=person>", move |args| {
        sink.borrow_mut().push(("goodbye".to_string(), args.to_vec()));
    });

    let sink = Rc::clone(&calls);
    app.command("ping", move |args| {
        sink.borrow_mut().push(("ping".to_string(), args.to_vec()));
    });

    let sink = Rc::clone(&calls);
    app.command("count <from:int> <to:int> <double:bool=false>", move |args| {
        sink.borrow_mut().push(("count".to_string(), args.to_vec()));
    });

    (app, calls)
}

#[test]
fn required_string_argument() {
    let (app, calls) = demo_app();
    app.dispatch(&argv(&["prog", "hello", "Ada"])).unwrap();
    assert_eq!(
        *calls.borrow(),
        vec![("hello".to_string(), vec![json!("Ada")])]
    );
}

#[test]
fn optional_argument_defaulted_and_overridden() {
    let (app, calls) = demo_app();
    app.dispatch(&argv(&["prog", "goodbye"])).unwrap();
    app.dispatch(&argv(&["prog", "goodbye", "Ada"])).unwrap();
    assert_eq!(
        *calls.borrow(),
        vec![
            ("goodbye".to_string(), vec![json!("person")]),
            ("goodbye".to_string(), vec![json!("Ada")]),
        ]
    );
}

#[test]
fn zero_argument_command() {
    let (app, calls) = demo_app();
    app.dispatch(&argv(&["prog", "ping"])).unwrap();
    assert_eq!(*calls.borrow(), vec![("ping".to_string(), Vec::new())]);
}

#[test]
fn mixed_types_with_and_without_trailing_optional() {
    let (app, calls) = demo_app();
    app.dispatch(&argv(&["prog", "count", "1", "3"])).unwrap();
    app.dispatch(&argv(&["prog", "count", "1", "3", "true"]))
        .unwrap();
    assert_eq!(
        *calls.borrow(),
        vec![
            (
                "count".to_string(),
                vec![json!(1), json!(3), json!(false)]
            ),
            ("count".to_string(), vec![json!(1), json!(3), json!(true)]),
        ]
    );
}

#[test]
fn no_command_invokes_nothing() {
    let (app, calls) = demo_app();
    assert_eq!(
        app.dispatch(&argv(&["prog"])).unwrap_err(),
        DispatchError::MissingCommand
    );
    assert!(calls.borrow().is_empty());
}

#[test]
fn non_numeric_token_invokes_nothing() {
    let (app, calls) = demo_app();
    let err = app.dispatch(&argv(&["prog", "count", "x", "3"])).unwrap_err();
    assert!(matches!(err, DispatchError::InvalidValue { .. }));
    assert!(calls.borrow().is_empty());
}

#[test]
fn combined_usage_lists_every_command() {
    let (app, _) = demo_app();
    let expected = concat!(
        "usage:\n",
        " prog hello <name:string>\n",
        " prog goodbye <name:string=person>\n",
        " prog ping\n",
        " prog count <from:int> <to:int> <double:bool=false>\n",
    );
    assert_eq!(app.usage_text("prog"), expected);
}

// A default literal registered today must convert the same way a matching
// token does at dispatch time.
#[test]
fn default_literal_round_trips_through_its_checker() {
    for (usage, token) in [
        ("cmd <v:string=person>", "person"),
        ("cmd <v:bool=false>", "false"),
        ("cmd <v:int=42>", "42"),
        ("cmd <v:float=0.5>", "0.5"),
    ] {
        let (_, args) = parse_usage(usage).unwrap();
        let spec = &args[0];
        assert_eq!(
            spec.default.clone().unwrap(),
            spec.convert(token).unwrap(),
            "{usage}"
        );
    }
}

#[test]
fn registering_twice_dispatches_only_the_latest() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut app = App::new();
    for round in ["old", "new"] {
        let sink = Rc::clone(&calls);
        app.command("deploy <env:string=staging>", move |args| {
            sink.borrow_mut()
                .push((round, args[0].as_str().unwrap_or_default().to_string()));
        });
    }

    app.dispatch(&argv(&["prog", "deploy"])).unwrap();
    assert_eq!(*calls.borrow(), vec![("new", "staging".to_string())]);
}
