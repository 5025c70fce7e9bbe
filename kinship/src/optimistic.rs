//! Optimistic mutation with rollback.
//!
//! A local guess is applied to the list before the request is sent. On success
//! the server's copy replaces the guess wholesale; on failure the list is put
//! back exactly as it was and the error goes to the notifier. A 2xx answer
//! whose body cannot be decoded still confirms the action, so the guess stays.

use std::future::Future;

use crate::errors::ClientError;
use crate::id::{EntityRef, Identified};
use crate::notify::Notifier;

/// What happened to the server's answer after a successful request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The entity at this index now holds the server's copy.
    Replaced(usize),
    /// The answer could not be applied (entity gone, no usable id, or an
    /// unreadable body); the local guess stays in place.
    Dropped,
}

/// Position of the entity whose normalized id equals `id`.
///
/// Entities without a usable id never match.
pub fn position_of<T: Identified>(list: &[T], id: &str) -> Option<usize> {
    list.iter()
        .position(|item| item.entity_id().is_ok_and(|own| own == id))
}

/// Applies `transform` to the entity `id` in `list`, awaits `request`, then
/// reconciles or rolls back.
///
/// Returns [`ClientError::NotFound`] without awaiting `request` when `id` is not in the list.
pub async fn apply_optimistic<T, F, Fut, N>(
    list: &mut Vec<T>,
    id: &str,
    transform: F,
    request: Fut,
    notifier: &N,
) -> Result<Reconciliation, ClientError>
where
    T: Identified + Clone,
    F: FnOnce(&mut T),
    Fut: Future<Output = Result<T, ClientError>>,
    N: Notifier + ?Sized,
{
    let Some(index) = position_of(list, id) else {
        let err = ClientError::NotFound {
            entity_id: Some(id.to_string()),
        };
        notifier.notify(&err);
        return Err(err);
    };

    let snapshot = list.clone();
    transform(&mut list[index]);

    match request.await {
        Ok(confirmed) => Ok(reconcile(list, confirmed)),
        Err(ClientError::Decode(detail)) => {
            log::warn!("keeping local state for {id}: server confirmed with an unreadable body ({detail})");
            Ok(Reconciliation::Dropped)
        }
        Err(err) => {
            *list = snapshot;
            notifier.notify(&err);
            Err(err)
        }
    }
}

/// Replaces the entity matching `confirmed`'s id with `confirmed`.
pub fn reconcile<T: Identified>(list: &mut [T], confirmed: T) -> Reconciliation {
    let confirmed_id = match confirmed.entity_id() {
        Ok(id) => id,
        Err(err) => {
            log::warn!("discarding server update without a usable id: {err}");
            return Reconciliation::Dropped;
        }
    };
    match position_of(list, &confirmed_id) {
        Some(index) => {
            list[index] = confirmed;
            Reconciliation::Replaced(index)
        }
        None => {
            log::warn!("discarding server update for {confirmed_id}: no longer in the local list");
            Reconciliation::Dropped
        }
    }
}

/// Flips `user_id`'s membership in `members` (likes, saves). Returns whether
/// the user is a member afterwards.
///
/// Entries are matched on the user they point at, so a populated entry with
/// its own `_id` is still recognised and removed.
pub fn toggle_membership(members: &mut Vec<EntityRef>, user_id: &str) -> bool {
    let before = members.len();
    members.retain(|member| !member.is_user(user_id));
    if members.len() == before {
        members.push(EntityRef::from_id(user_id));
        true
    } else {
        false
    }
}

/// True when `user_id` appears in `members`.
pub fn contains_member(members: &[EntityRef], user_id: &str) -> bool {
    members.iter().any(|member| member.is_user(user_id))
}
