use todotree_core::{AnnotationScanner, Task, TaskStatus};

#[test]
fn new_task_scans_annotation_views_from_text() {
    let scanner = AnnotationScanner::with_defaults();
    let task = Task::new(
        "Buy milk @due(2024-01-01) >notify(email) #check(x)",
        TaskStatus::Uncompleted,
        scanner,
    );

    assert_eq!(task.status, TaskStatus::Uncompleted);
    assert_eq!(task.note, "");
    assert!(task.tasks.is_empty());

    assert_eq!(task.tags().len(), 1);
    assert_eq!(task.tags()[0].name, "due");
    assert_eq!(task.tags()[0].value, "2024-01-01");
    assert_eq!(task.actions().len(), 1);
    assert_eq!(task.actions()[0].kind, "notify");
    assert_eq!(task.actions()[0].params, "email");
    assert_eq!(task.oracles().len(), 1);
    assert_eq!(task.oracles()[0].kind, "check");
    assert_eq!(task.oracles()[0].params, "x");
}

#[test]
fn set_text_rescans_views() {
    let scanner = AnnotationScanner::with_defaults();
    let mut task = Task::new("old @due(monday)", TaskStatus::Uncompleted, scanner);
    assert_eq!(task.tags().len(), 1);

    task.set_text("new text, no annotations", scanner);
    assert_eq!(task.text(), "new text, no annotations");
    assert!(task.tags().is_empty());

    task.set_text("again @a(1) @b(2)", scanner);
    assert_eq!(task.tags().len(), 2);
    assert_eq!(task.tags()[1].name, "b");
}

#[test]
fn add_tag_appends_exactly_once() {
    let scanner = AnnotationScanner::with_defaults();
    let mut task = Task::new("Buy milk", TaskStatus::Uncompleted, scanner);

    task.add_tag("due", "friday", scanner);
    assert_eq!(task.text(), "Buy milk @due(friday)");
    assert_eq!(task.tags().len(), 1);

    task.add_tag("due", "friday", scanner);
    assert_eq!(task.text(), "Buy milk @due(friday)");
    assert_eq!(task.tags().len(), 1);
}

#[test]
fn remove_tag_strips_text_and_views() {
    let scanner = AnnotationScanner::with_defaults();
    let mut task = Task::new(
        "Buy milk @due(friday) @shop(corner) @due(monday)",
        TaskStatus::Uncompleted,
        scanner,
    );
    assert_eq!(task.tags().len(), 3);

    task.remove_tag("due", scanner);
    assert_eq!(task.text(), "Buy milk @shop(corner)");
    assert_eq!(task.tags().len(), 1);
    assert_eq!(task.tags()[0].name, "shop");
}

#[test]
fn status_helpers_toggle_between_completed_and_uncompleted() {
    let scanner = AnnotationScanner::with_defaults();
    let mut task = Task::new("ship it", TaskStatus::Paused, scanner);
    assert!(!task.is_completed());

    task.toggle_status();
    assert_eq!(task.status, TaskStatus::Completed);
    assert!(task.is_completed());

    task.toggle_status();
    assert_eq!(task.status, TaskStatus::Uncompleted);

    task.set_note("left at the counter\nask Ana");
    assert_eq!(task.note, "left at the counter\nask Ana");
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let scanner = AnnotationScanner::with_defaults();
    let mut task = Task::new(
        "Deploy @env(prod) >restart(api) #uptime(24h)",
        TaskStatus::Underway,
        scanner,
    );
    task.set_note("after 18:00");

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["text"], "Deploy @env(prod) >restart(api) #uptime(24h)");
    assert_eq!(json["status"], "underway");
    assert_eq!(json["note"], "after 18:00");
    assert_eq!(json["tags"][0]["name"], "env");
    assert_eq!(json["tags"][0]["value"], "prod");
    assert_eq!(json["actions"][0]["type"], "restart");
    assert_eq!(json["actions"][0]["params"], "api");
    assert_eq!(json["oracles"][0]["type"], "uptime");
    assert_eq!(json["oracles"][0]["params"], "24h");
    assert_eq!(json["tasks"], serde_json::json!([]));
}
