//! Observer event stream.

use std::cell::RefCell;
use std::rc::Rc;

use kestrel_ir::build::*;
use pretty_assertions::assert_eq;

use super::support::run;
use crate::{EvalEvent, EvalObserver, Interpreter};

#[derive(Default)]
struct Recorder {
    events: RefCell<Vec<String>>,
}

impl EvalObserver for Recorder {
    fn on_event(&self, event: &EvalEvent<'_>) {
        let line = match event {
            EvalEvent::NodeEntered { kind } => format!("enter {kind}"),
            EvalEvent::BlockEntered => "block {".to_owned(),
            EvalEvent::BlockLeft => "}".to_owned(),
            EvalEvent::BlockReturned => "} return".to_owned(),
            EvalEvent::VariableDefined { name, value } => format!("def {name} = {value}"),
            EvalEvent::VariableRead { name, value } => format!("read {name} = {value}"),
            EvalEvent::VariableWritten { name, value } => format!("write {name} = {value}"),
            EvalEvent::RunCompleted { steps } => format!("done after {steps}"),
        };
        self.events.borrow_mut().push(line);
    }
}

fn recording() -> (Interpreter, Rc<Recorder>) {
    let recorder = Rc::new(Recorder::default());
    let interp = Interpreter::builder()
        .shared_observer(recorder.clone())
        .build();
    (interp, recorder)
}

#[tokio::test]
async fn events_follow_evaluation_order() {
    let (interp, recorder) = recording();
    let result = run(&interp, [def("x", num(1.0)), ret(var("x"))]).await;
    assert!(result.is_ok());
    assert_eq!(
        *recorder.events.borrow(),
        vec![
            "block {",
            "enter def",
            "enter num",
            "def x = 1",
            "enter return",
            "enter var",
            "read x = 1",
            "} return",
            "done after 4",
        ]
    );
}

#[tokio::test]
async fn assignment_and_nested_blocks_are_reported() {
    let (interp, recorder) = recording();
    let result = run(
        &interp,
        [def("x", num(1.0)), block([assign("x", num(2.0))])],
    )
    .await;
    assert!(result.is_ok());
    let events = recorder.events.borrow();
    let interesting: Vec<&str> = events
        .iter()
        .map(String::as_str)
        .filter(|e| !e.starts_with("enter"))
        .collect();
    assert_eq!(
        interesting,
        vec!["block {", "def x = 1", "block {", "write x = 2", "}", "}", "done after 5"]
    );
}

#[tokio::test]
async fn failed_runs_do_not_report_completion() {
    let (interp, recorder) = recording();
    let result = run(&interp, [expr(var("missing"))]).await;
    assert!(result.is_err());
    let events = recorder.events.borrow();
    assert_eq!(events.last().map(String::as_str), Some("enter var"));
}
