//! Reporter - build progress observers
//!
//! Key types:
//! - `Reporter`: the five lifecycle events the build engine emits
//! - `ConsoleReporter`: prefixed per-unit logs on one output stream
//! - `CompositeReporter`: ordered fan-out to several reporters
//! - `RecordingReporter`: keeps every event in memory
//! - `NoopReporter`: ignores everything

mod composite;
mod console;
mod recording;

pub use composite::CompositeReporter;
pub use console::ConsoleReporter;
pub use recording::{RecordingReporter, ReportEvent};

use std::error::Error;
use std::sync::Arc;

use crate::unit::{BuildPlan, BuildUnit, LogStream};

/// Feedback about build progress.
///
/// All methods run inline on the build's hot path, from whichever thread
/// drives that part of the build. Unit-scoped calls for different units
/// arrive concurrently. Implementations must not block.
///
/// For one unit the engine guarantees `unit_build_started` happens before
/// any `unit_build_log`, which happen before `unit_build_finished`. Nothing
/// is guaranteed across units. `build_started` and `build_finished` bracket
/// the whole run.
pub trait Reporter: Send + Sync {
    /// A user-requested build begins. `plan` holds every transitive unit and
    /// whether it is already built.
    ///
    /// The root unit is also passed to `unit_build_started` once its
    /// dependencies are built.
    fn build_started(&self, root: &dyn BuildUnit, plan: &BuildPlan);

    /// A user-requested build has ended. `Ok(())` means success.
    fn build_finished(&self, root: &dyn BuildUnit, result: Result<(), &dyn Error>);

    /// Build work for `unit` begins; its dependencies are satisfied.
    fn unit_build_started(&self, unit: &dyn BuildUnit);

    /// A build command of `unit` produced output.
    fn unit_build_log(&self, unit: &dyn BuildUnit, stream: LogStream, buf: &[u8]);

    /// The build of `unit` has ended. Called once per unit that built.
    fn unit_build_finished(&self, unit: &dyn BuildUnit, result: Result<(), &dyn Error>);
}

macro_rules! forward_reporter {
    ($($ptr:ty),*) => {$(
        impl<R: Reporter + ?Sized> Reporter for $ptr {
            fn build_started(&self, root: &dyn BuildUnit, plan: &BuildPlan) {
                (**self).build_started(root, plan)
            }

            fn build_finished(&self, root: &dyn BuildUnit, result: Result<(), &dyn Error>) {
                (**self).build_finished(root, result)
            }

            fn unit_build_started(&self, unit: &dyn BuildUnit) {
                (**self).unit_build_started(unit)
            }

            fn unit_build_log(&self, unit: &dyn BuildUnit, stream: LogStream, buf: &[u8]) {
                (**self).unit_build_log(unit, stream, buf)
            }

            fn unit_build_finished(&self, unit: &dyn BuildUnit, result: Result<(), &dyn Error>) {
                (**self).unit_build_finished(unit, result)
            }
        }
    )*};
}

forward_reporter!(Arc<R>, Box<R>, &R);

/// Reporter that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl NoopReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for NoopReporter {
    fn build_started(&self, _root: &dyn BuildUnit, _plan: &BuildPlan) {}

    fn build_finished(&self, _root: &dyn BuildUnit, _result: Result<(), &dyn Error>) {}

    fn unit_build_started(&self, _unit: &dyn BuildUnit) {}

    fn unit_build_log(&self, _unit: &dyn BuildUnit, _stream: LogStream, _buf: &[u8]) {}

    fn unit_build_finished(&self, _unit: &dyn BuildUnit, _result: Result<(), &dyn Error>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reporter_is_object_safe() {
        fn accepts(_: &dyn Reporter) {}

        accepts(&NoopReporter::new());
        accepts(&Arc::new(NoopReporter));
        accepts(&Box::new(NoopReporter) as &dyn Reporter);
    }

    #[test]
    fn reporters_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NoopReporter>();
        assert_send_sync::<ConsoleReporter>();
        assert_send_sync::<CompositeReporter>();
        assert_send_sync::<RecordingReporter>();
        assert_send_sync::<Arc<dyn Reporter>>();
    }

    #[test]
    fn arc_forwards_to_inner() {
        use crate::error::Result;

        struct Unit;
        impl BuildUnit for Unit {
            fn full_name(&self) -> &str {
                "a:lib"
            }
            fn version(&self) -> Result<String> {
                Ok("v1".into())
            }
        }

        let recorder = Arc::new(RecordingReporter::new());
        let shared: Arc<dyn Reporter> = Arc::new(Arc::clone(&recorder));
        shared.unit_build_started(&Unit);
        shared.unit_build_log(&Unit, LogStream::Stdout, b"x");

        assert_eq!(recorder.len(), 2);
    }
}
