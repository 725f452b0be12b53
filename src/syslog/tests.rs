use crate::syslog::{mock, Facility, SyslogTarget, SyslogTargetBuilder};
use crate::target::Target;
use crate::types::Severity;

#[test]
fn test_local_log() {
    let ((), events) = mock::record(|| {
        {
            let mut tmp_target = SyslogTargetBuilder::new().ident("hello").local().unwrap();
            tmp_target.write(Severity::Debug, "Constructed a temporary target.");

            // Dropping the target calls `closelog`, since its tag is the current one.
        }

        let mut target = SyslogTargetBuilder::new()
            .facility(Facility::Local0)
            .ident("plainlog-example-app")
            .local()
            .unwrap();
        target.write(Severity::Info, "Hello, world!");

        let mut target2 = SyslogTargetBuilder::new()
            .facility(Facility::Local1)
            .ident("target2")
            .local()
            .unwrap();
        target2.write(Severity::Error, "Message from second target\0 while first still active.");

        // The first target is no longer the current one.
        target.close().unwrap();
        target.write(Severity::Error, "Dropped after close.");
        target2.close().unwrap();
        target2.close().unwrap();
    });

    let expected_events = vec![
        mock::Event::Open {
            facility: libc::LOG_USER,
            option: libc::LOG_PID,
            ident: "hello".to_string(),
        },
        mock::Event::Log {
            priority: libc::LOG_DEBUG,
            format: "%s".to_string(),
            message: "Constructed a temporary target.".to_string(),
        },
        mock::Event::Close,
        mock::Event::IdentReleased("hello".to_string()),
        mock::Event::Open {
            facility: libc::LOG_LOCAL0,
            option: libc::LOG_PID,
            ident: "plainlog-example-app".to_string(),
        },
        mock::Event::Log {
            priority: libc::LOG_INFO,
            format: "%s".to_string(),
            message: "Hello, world!".to_string(),
        },
        mock::Event::Open {
            facility: libc::LOG_LOCAL1,
            option: libc::LOG_PID,
            ident: "target2".to_string(),
        },
        mock::Event::Log {
            priority: libc::LOG_ERR,
            format: "%s".to_string(),
            message: "Message from second target while first still active.".to_string(),
        },
        // No `CloseLog` for the first target: `target2` owns the current tag.
        mock::Event::IdentReleased("plainlog-example-app".to_string()),
        mock::Event::Close,
        mock::Event::IdentReleased("target2".to_string()),
    ];

    assert!(
        events == expected_events,
        "events didn't match\ngot: {:#?}\nexpected: {:#?}",
        events,
        expected_events
    );
}

#[test]
fn test_local_default_tag_is_program_name() {
    let (name, events) = mock::record(|| {
        let mut target = SyslogTarget::local().unwrap();
        target.close().unwrap();
        crate::misc::program_name()
    });
    assert_eq!(
        events[0],
        mock::Event::Open {
            facility: libc::LOG_USER,
            option: libc::LOG_PID,
            ident: name,
        }
    );
}
