//! crates/agendas_core/src/repositories/mod.rs
//!
//! One repository per entity type, each built on top of a [`RecordStore`]
//! port. Every mutation is a whole-collection read-modify-write against the
//! backing store.

pub mod appointments;
pub mod clients;
pub mod messages;
pub mod users;

pub use appointments::AppointmentRepository;
pub use clients::ClientRepository;
pub use messages::MessageRepository;
pub use users::UserRepository;

/// Next integer id: `max(existing) + 1`, starting at 1.
///
/// Deliberately recomputed from the live collection rather than kept as an
/// independent sequence, so deleting the highest-id record makes its id
/// available again. This matches the historical behaviour of the service.
pub(crate) fn next_id<I>(ids: I) -> i64
where
    I: Iterator<Item = i64>,
{
    ids.max().map_or(1, |max| max + 1)
}
