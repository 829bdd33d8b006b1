use crate::sim::SimTime;
use crate::trace::{ControlKind, FrameDir, TraceLog, TraceRecord, TraceRecordKind};

fn timeout(node: usize, seq_num: usize) -> TraceRecordKind {
    TraceRecordKind::Timeout { node, seq_num }
}

#[test]
fn records_come_out_ordered_by_nominal_time_then_insertion() {
    let mut log = TraceLog::default();
    // Deliberately pushed out of order, as the state machine produces them
    log.push(SimTime::from_units(9), timeout(0, 2));
    log.push(SimTime::from_units(3), timeout(0, 0));
    log.push(SimTime::from_units(9), timeout(0, 3));
    log.push(SimTime::from_units(5), timeout(1, 1));

    log.finish();
    let lines = log.lines();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("at time [3]"));
    assert!(lines[1].contains("at time [5]"));
    // Same nominal time: insertion order decides
    assert!(lines[2].contains("seq_num=[2]"));
    assert!(lines[3].contains("seq_num=[3]"));
}

#[test]
fn drain_ready_emits_only_records_due_now() {
    let mut log = TraceLog::default();
    log.push(SimTime::from_units(1), timeout(0, 0));
    log.push(SimTime::from_units(10), timeout(0, 1));

    log.drain_ready(SimTime::from_units(5));
    assert_eq!(log.lines().len(), 1);

    log.drain_ready(SimTime::from_units(10));
    assert_eq!(log.lines().len(), 2);
}

#[test]
fn channel_error_line_text() {
    let rec = TraceRecord {
        at: SimTime::from_units(2),
        kind: TraceRecordKind::ChannelError {
            node: 0,
            code: "0101".to_string(),
        },
    };
    assert_eq!(
        rec.to_string(),
        "At time [2], Node[0] , Introducing channel error with code =[0101]"
    );
}

#[test]
fn frame_activity_line_text() {
    let rec = TraceRecord {
        at: SimTime::from_units_f64(4.5),
        kind: TraceRecordKind::FrameActivity {
            node: 0,
            dir: FrameDir::Sent,
            seq_num: 1,
            payload: "$Hello$".to_string(),
            trailer: 0b0101_0001,
            modified: -1,
            lost: false,
            duplicate: 0,
            delay: SimTime::ZERO,
        },
    };
    assert_eq!(
        rec.to_string(),
        "At time [4.5], Node[0] [sent] frame with seq_num=[1] and payload=[$Hello$] \
         and trailer=[01010001] , Modified [-1] ,Lost [No], Duplicate [0], Delay [0]"
    );
}

#[test]
fn received_frame_line_reports_the_corruption_position() {
    let rec = TraceRecord {
        at: SimTime::from_units(6),
        kind: TraceRecordKind::FrameActivity {
            node: 1,
            dir: FrameDir::Received,
            seq_num: 0,
            payload: "$Hullo$".to_string(),
            trailer: 0b0000_1111,
            modified: 13,
            lost: false,
            duplicate: 0,
            delay: SimTime::ZERO,
        },
    };
    assert_eq!(
        rec.to_string(),
        "At time [6], Node[1] [received] frame with seq_num=[0] and payload=[$Hullo$] \
         and trailer=[00001111] , Modified [13] ,Lost [No], Duplicate [0], Delay [0]"
    );
}

#[test]
fn timeout_line_text() {
    let rec = TraceRecord {
        at: SimTime::from_units(11),
        kind: timeout(0, 3),
    };
    assert_eq!(
        rec.to_string(),
        "Time out event at time [11], at Node[0] for frame with seq_num=[3]"
    );
}

#[test]
fn control_line_text() {
    let ack = TraceRecord {
        at: SimTime::from_units(5),
        kind: TraceRecordKind::Control {
            node: 1,
            kind: ControlKind::Ack,
            number: 2,
            lost: false,
        },
    };
    assert_eq!(
        ack.to_string(),
        "At time [5], Node[1] Sending [ACK] with number [2] , loss [No]"
    );

    let nack = TraceRecord {
        at: SimTime::from_units_f64(5.5),
        kind: TraceRecordKind::Control {
            node: 1,
            kind: ControlKind::Nack,
            number: 2,
            lost: true,
        },
    };
    assert_eq!(
        nack.to_string(),
        "At time [5.5], Node[1] Sending [NACK] with number [2] , loss [Yes]"
    );
}
