use std::sync::Arc;

use cardfill::{
    ContactField, ContactRecord, DropOutcome, DropTarget, FillController, FillSettings,
    ManualFillState, NullSink, Offset, Point, Rect, TieBreak, TokenSource,
};

const FIRST_NAME: Rect = Rect {
    x: 20.0,
    y: 200.0,
    width: 320.0,
    height: 44.0,
};
const EMAIL: Rect = Rect {
    x: 20.0,
    y: 260.0,
    width: 320.0,
    height: 44.0,
};

fn screen(raw: &str, record: ContactRecord) -> ManualFillState {
    let mut state = ManualFillState::new(record, &FillSettings::default(), Arc::new(NullSink));
    state.load_tokens(raw);
    state.report_bounds("firstName", FIRST_NAME).unwrap();
    state.report_bounds("email", EMAIL).unwrap();
    state
}

fn drag(state: &mut ManualFillState, token: usize, to: Point) -> Option<cardfill::DropReport> {
    let from = Point::new(40.0, 40.0);
    state.gesture_start(token, from);
    state.gesture_update(token, to, Offset::new(to.x - from.x, to.y - from.y));
    state.gesture_end(token, to)
}

fn centre(rect: Rect) -> Point {
    Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
}

#[test]
fn normalization_is_idempotent() {
    let source = TokenSource::default();
    let raw = "ACME Corp.;Jane Doe\nSenior Engineer, Tel\n+1 (555) 010-0100\nE-mail\njane@acme.io\nx";
    let first = source.normalize(raw);
    let joined = first
        .iter()
        .map(|t| t.text())
        .collect::<Vec<_>>()
        .join("\n");
    assert_eq!(source.normalize(&joined), first);
}

#[test]
fn denylisted_labels_are_filtered() {
    let tokens = TokenSource::default().normalize("Mobile\nJohn Smith\nTel\nAcme Corp");
    let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
    assert_eq!(texts, vec!["John Smith", "Acme Corp"]);
}

#[test]
fn short_fragments_are_filtered() {
    let tokens = TokenSource::default().normalize("A\nJo");
    let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
    assert_eq!(texts, vec!["Jo"]);
}

#[test]
fn drop_on_zone_edges_counts_as_inside() {
    let corners = [
        Point::new(FIRST_NAME.x, FIRST_NAME.y),
        Point::new(FIRST_NAME.x + FIRST_NAME.width, FIRST_NAME.y + FIRST_NAME.height),
        Point::new(FIRST_NAME.x, FIRST_NAME.y + FIRST_NAME.height),
        Point::new(FIRST_NAME.x + FIRST_NAME.width, FIRST_NAME.y),
    ];

    for corner in corners {
        let mut state = screen("Jane", ContactRecord::new());
        let report = drag(&mut state, 0, corner).unwrap();
        assert!(report.applied, "corner {corner:?} missed");
        assert_eq!(state.record().first_name, "Jane");
    }
}

#[test]
fn drop_overwrites_existing_value() {
    let mut record = ContactRecord::new();
    record.email = "old@example.com".into();
    let mut state = screen("new@example.com", record);

    drag(&mut state, 0, centre(EMAIL)).unwrap();
    assert_eq!(state.record().email, "new@example.com");
}

#[test]
fn drop_outside_zones_changes_nothing() {
    let mut record = ContactRecord::new();
    record.first_name = "Jane".into();
    record.additional_phones = vec!["555-0100".into()];
    let mut state = screen("Acme Corp\njane@acme.io", record.clone());

    let report = drag(&mut state, 1, Point::new(700.0, 10.0)).unwrap();
    assert_eq!(report.outcome, DropOutcome::Cancelled);
    assert!(!report.applied);
    assert_eq!(state.record().to_json().unwrap(), record.to_json().unwrap());
}

#[test]
fn a_token_can_be_dropped_twice() {
    let mut state = screen("Jordan", ContactRecord::new());
    state.report_bounds("nickname", Rect::new(20.0, 320.0, 320.0, 44.0)).unwrap();

    drag(&mut state, 0, centre(FIRST_NAME)).unwrap();
    drag(&mut state, 0, Point::new(100.0, 340.0)).unwrap();

    assert_eq!(state.tokens().len(), 1);
    assert_eq!(state.record().first_name, "Jordan");
    assert_eq!(state.record().field(ContactField::Nickname), "Jordan");
}

#[test]
fn additional_phone_drop_needs_an_existing_slot() {
    let mut record = ContactRecord::new();
    record.additional_phones = vec![String::new(), String::new()];
    let mut state = screen("555-0199", record.clone());
    let slot = Rect::new(20.0, 400.0, 320.0, 44.0);
    state.report_bounds("additionalPhones_2", slot).unwrap();

    let report = drag(&mut state, 0, centre(slot)).unwrap();
    assert_eq!(
        report.outcome,
        DropOutcome::Dropped {
            target: DropTarget::AdditionalPhone(2),
            text: "555-0199".into()
        }
    );
    assert!(!report.applied);
    assert_eq!(state.record(), &record);

    assert_eq!(state.add_phone_slot(), 2);
    let report = drag(&mut state, 0, centre(slot)).unwrap();
    assert!(report.applied);
    assert_eq!(state.record().additional_phones, vec!["", "", "555-0199"]);
}

#[test]
fn smallest_area_tie_break_prefers_inner_zone() {
    let mut settings = FillSettings::default();
    settings.zones.tie_break = TieBreak::SmallestArea;
    let mut state = ManualFillState::new(ContactRecord::new(), &settings, Arc::new(NullSink));
    state.load_tokens("Acme Corp");
    state.report_bounds("notes", Rect::new(0.0, 0.0, 400.0, 400.0)).unwrap();
    state.report_bounds("company", Rect::new(50.0, 50.0, 100.0, 40.0)).unwrap();

    drag(&mut state, 0, Point::new(60.0, 60.0)).unwrap();
    assert_eq!(state.record().company, "Acme Corp");
    assert_eq!(state.record().notes, "");
}

#[tokio::test]
async fn concurrent_drags_from_many_threads() {
    let mut record = ContactRecord::new();
    record.additional_phones = vec![String::new(); 4];
    let controller = FillController::new(record, FillSettings::default(), Arc::new(NullSink))
        .unwrap();
    controller
        .load_tokens("555-0100\n555-0101\n555-0102\n555-0103")
        .await
        .unwrap();
    for i in 0..4 {
        controller
            .report_bounds(
                format!("additionalPhones_{i}"),
                Rect::new(0.0, 100.0 * i as f64, 300.0, 40.0),
            )
            .await
            .unwrap();
    }

    let mut handles = Vec::new();
    for i in 0..4usize {
        let controller = controller.clone();
        handles.push(tokio::spawn(async move {
            let target = Point::new(10.0, 100.0 * i as f64 + 10.0);
            controller.gesture_start(i, Point::new(0.0, 0.0)).await?;
            controller
                .gesture_update(i, target, Offset::new(target.x, target.y))
                .await?;
            controller.gesture_end(i, target).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().unwrap().unwrap().applied);
    }

    let record = controller.record().await.unwrap();
    assert_eq!(
        record.additional_phones,
        vec!["555-0100", "555-0101", "555-0102", "555-0103"]
    );
}
