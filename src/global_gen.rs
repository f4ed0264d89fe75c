//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::Uuid;
use inner::GlobalGenInner;

/// Returns the lock handle of the process-wide global generator, creating one
/// if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .expect("uuid1: could not lock global generator")
}

/// Generates a UUIDv1 object.
///
/// This function employs a global generator that stamps every UUID with one
/// process-wide node identifier substitute and clock sequence, keeping
/// identifiers distinct across threads even when the system clock stalls or
/// rolls back. On Unix, this function resets the generator when the process
/// ID changes (i.e., upon process forks) to prevent collisions across
/// processes.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid1::uuid1();
/// println!("{}", uuid); // e.g., "8a2e63fa-7fc4-11f1-92-3d-29f8fb24c379"
/// println!("{:?}", uuid.to_bytes()); // as 16-byte big-endian sequence
///
/// let uuid_string: String = uuid1::uuid1().to_string();
/// ```
pub fn uuid1() -> Uuid {
    lock_global_gen().get_mut().generate()
}

mod inner {
    use rand::rngs::adapter::ReseedingRng;
    use rand::rngs::OsRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::V1Generator;

    /// The type alias for the random number generator of the global
    /// generator.
    ///
    /// The global generator currently employs [`ChaCha12Core`] with the
    /// [`ReseedingRng`] wrapper to emulate the strategy used by
    /// [`rand::rngs::ThreadRng`].
    pub type GlobalGenRng = ReseedingRng<ChaCha12Core, OsRng>;

    /// A thin wrapper to reset the state when the process ID changes (i.e.,
    /// upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: V1Generator<GlobalGenRng>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: V1Generator::new(ReseedingRng::new(
                    ChaCha12Core::from_entropy(),
                    1024 * 64,
                    OsRng,
                )),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`V1Generator`] instance,
        /// resetting the state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut V1Generator<GlobalGenRng> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}
