use todotree_core::{AnnotationScanner, TodoParser};

const RICH_FIXTURE: &str = "\
Home:
  [ ] Buy milk @due(2024-01-01) >notify(email) #check(x)
  [>] Clean garage
      first note line
      second note line
      [o] Sort tools
          [x] Label boxes
  [x] Pay rent @repeat(monthly)

Errands:

Work:
    [ ] Write report #stats(q3)
    keep it short
";

#[test]
fn parse_serialize_parse_is_structurally_stable() {
    let parser = TodoParser::with_defaults();
    let first = parser.parse(RICH_FIXTURE);
    let second = parser.parse(&parser.serialize(&first));
    assert_eq!(first, second);
}

#[test]
fn serialized_text_is_a_fixed_point() {
    let parser = TodoParser::with_defaults();
    let once = parser.serialize(&parser.parse(RICH_FIXTURE));
    let twice = parser.serialize(&parser.parse(&once));
    assert_eq!(once, twice);
}

#[test]
fn serialization_layout_is_exact() {
    let parser = TodoParser::with_defaults();
    let content = "\
Home:
  [>] Clean garage @area(back)
   left of the door
   behind the bikes
      [x] Sort tools
";
    let projects = parser.parse(content);
    let expected = "\
Home:
    [>] Clean garage @area(back)
    left of the door
    behind the bikes
        [x] Sort tools
";
    assert_eq!(parser.serialize(&projects), expected);
}

#[test]
fn annotations_are_emitted_verbatim_not_re_rendered() {
    let parser = TodoParser::with_defaults();
    let projects = parser.parse("P:\n    [ ] Buy milk @due(friday) >notify(sms)\n");
    let output = parser.serialize(&projects);
    assert_eq!(output.matches("@due(friday)").count(), 1);
    assert_eq!(output.matches(">notify(sms)").count(), 1);
}

#[test]
fn re_adding_a_present_tag_does_not_duplicate_it_in_output() {
    let parser = TodoParser::with_defaults();
    let scanner = AnnotationScanner::with_defaults();
    let mut projects = parser.parse("P:\n    [ ] Buy milk @due(friday)\n");

    projects[0].tasks[0].add_tag("due", "friday", scanner);
    let output = parser.serialize(&projects);
    assert_eq!(output.matches("@due(friday)").count(), 1);

    // And the round trip through text keeps a single parsed tag.
    let reparsed = parser.parse(&output);
    assert_eq!(reparsed[0].tasks[0].tags().len(), 1);
}

#[test]
fn notes_survive_round_trips_with_original_line_breaks() {
    let parser = TodoParser::with_defaults();
    let projects = parser.parse(RICH_FIXTURE);
    let garage = &projects[0].tasks[1];
    assert_eq!(garage.note, "first note line\nsecond note line");

    let reparsed = parser.parse(&parser.serialize(&projects));
    assert_eq!(reparsed[0].tasks[1].note, garage.note);
}
