//! Detail Controller
//!
//! Owns the mode/record/usage triple for one login record and drives its
//! transitions. The store is reached through two future chains: a usage
//! fetch on activation, and a write-then-refetch chain on commit. Both are
//! returned to the host, which runs them on the screen's single-threaded
//! context and feeds completions back through [`apply_store_event`].
//!
//! [`apply_store_event`]: DetailController::apply_store_event

use std::future::Future;
use std::rc::Rc;

use crate::store::{CredentialRecord, CredentialStore, UsageMetadata};

use super::rows::{Field, Redraw, Row, SubmitOutcome};
use super::Mode;

/// A store completion to fold back into controller state.
///
/// Completions apply in arrival order; if two fetches overlap the later one
/// wins. There is no sequencing token and no cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Usage-metadata fetch finished. `None` means the store had nothing,
    /// which still replaces the current value.
    UsageFetched(Option<UsageMetadata>),
    /// The follow-up read after a successful write came back with the
    /// authoritative record.
    RecordRefetched(CredentialRecord),
}

/// View/edit state machine for one login record.
pub struct DetailController<S> {
    store: Rc<S>,
    mode: Mode,
    record: CredentialRecord,
    usage: Option<UsageMetadata>,
    focus: Option<Field>,
}

impl<S: CredentialStore> DetailController<S> {
    /// Construct with the record the user selected elsewhere.
    ///
    /// Starts in `Viewing` with no usage metadata; nothing is fetched until
    /// [`activate`](Self::activate).
    pub fn new(store: Rc<S>, record: CredentialRecord) -> Self {
        Self {
            store,
            mode: Mode::Viewing,
            record,
            usage: None,
            focus: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn record(&self) -> &CredentialRecord {
        &self.record
    }

    pub fn usage(&self) -> Option<&UsageMetadata> {
        self.usage.as_ref()
    }

    pub fn focus(&self) -> Option<Field> {
        self.focus
    }

    /// Start the usage-metadata fetch for this record.
    ///
    /// Called when the screen becomes visible; may be called again on
    /// re-activation. The returned future must not block rendering: the host
    /// runs it concurrently and applies the completion whenever it lands.
    pub fn activate(&self) -> impl Future<Output = StoreEvent> + 'static
    where
        S: 'static,
    {
        let store = Rc::clone(&self.store);
        let id = self.record.id.clone();
        async move { StoreEvent::UsageFetched(store.get_usage_data(&id).await) }
    }

    /// Enter edit mode, focusing the username field first.
    ///
    /// Idempotent when already editing: the mode is untouched, the focus
    /// just returns to the first field.
    pub fn begin_edit(&mut self) -> Redraw {
        self.mode = Mode::Editing;
        self.focus = Some(Field::Username);
        Redraw::Rows
    }

    /// Leave edit mode and commit the captured text.
    ///
    /// The transition back to `Viewing` and the swap to the candidate record
    /// happen before the store acknowledges anything. A missing capture
    /// degrades to the empty string, not to the prior value: commits replace
    /// the record wholesale, they never merge.
    ///
    /// The returned future performs the significant write and, only once the
    /// write is acknowledged, re-reads the authoritative record. A failed
    /// write or an empty refetch resolves to `None` and the optimistic
    /// record simply stays in place.
    pub fn commit_edit(
        &mut self,
        username: Option<String>,
        password: Option<String>,
        hostname: Option<String>,
    ) -> (Redraw, impl Future<Output = Option<StoreEvent>> + 'static)
    where
        S: 'static,
    {
        self.mode = Mode::Viewing;
        self.focus = None;

        let candidate = CredentialRecord {
            id: self.record.id.clone(),
            hostname: hostname.unwrap_or_default(),
            username: username.unwrap_or_default(),
            password: password.unwrap_or_default(),
        };
        self.record = candidate.clone();

        let store = Rc::clone(&self.store);
        let fut = async move {
            let id = candidate.id.clone();
            store.update_record(&id, &candidate, true).await.ok()?;
            store.get_record(&id).await.map(StoreEvent::RecordRefetched)
        };

        (Redraw::Rows, fut)
    }

    /// Fold a store completion back into controller state.
    pub fn apply_store_event(&mut self, event: StoreEvent) -> Redraw {
        match event {
            StoreEvent::UsageFetched(usage) => {
                self.usage = usage;
                Redraw::Footer
            }
            StoreEvent::RecordRefetched(record) => {
                self.record = record;
                Redraw::Rows
            }
        }
    }

    /// React to a submit signal from an editable field.
    ///
    /// Non-last fields hand focus to the next field in tab order and report
    /// handled; the last field gives focus up entirely. The host treats a
    /// release from the last field as the commit trigger.
    pub fn handle_submit(&mut self, field: Field) -> SubmitOutcome {
        match field.next() {
            Some(next) => {
                self.focus = Some(next);
                SubmitOutcome::Handled(next)
            }
            None => {
                self.focus = None;
                SubmitOutcome::Released
            }
        }
    }

    /// Describe the screen as row descriptors.
    ///
    /// Pure: always 5 rows in fixed order, never reordered or hidden.
    pub fn rows(&self) -> Vec<Row> {
        let editing = self.mode.is_editing();
        let field_row = |field: Field, value: &str| Row::Input {
            field,
            value: value.to_string(),
            hint: field.hint(),
            editing,
            focused: editing && self.focus == Some(field),
        };

        vec![
            Row::Title {
                hostname: self.record.hostname.clone(),
            },
            field_row(Field::Username, &self.record.username),
            field_row(Field::Password, &self.record.password),
            field_row(Field::Website, &self.record.hostname),
            Row::Delete,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{RecordId, StoreError, StoreResult};
    use std::cell::{Cell, RefCell};

    /// In-memory store with scriptable responses and call recording.
    #[derive(Default)]
    struct FakeStore {
        usage: RefCell<Option<UsageMetadata>>,
        record: RefCell<Option<CredentialRecord>>,
        fail_update: Cell<bool>,
        refetch_empty: Cell<bool>,
        updates: RefCell<Vec<(CredentialRecord, bool)>>,
        record_reads: Cell<usize>,
    }

    impl CredentialStore for FakeStore {
        async fn get_usage_data(&self, _id: &RecordId) -> Option<UsageMetadata> {
            *self.usage.borrow()
        }

        async fn get_record(&self, _id: &RecordId) -> Option<CredentialRecord> {
            self.record_reads.set(self.record_reads.get() + 1);
            if self.refetch_empty.get() {
                return None;
            }
            self.record.borrow().clone()
        }

        async fn update_record(
            &self,
            _id: &RecordId,
            updated: &CredentialRecord,
            significant: bool,
        ) -> StoreResult<()> {
            if self.fail_update.get() {
                return Err(StoreError::Io("write refused".to_string()));
            }
            self.updates.borrow_mut().push((updated.clone(), significant));
            *self.record.borrow_mut() = Some(updated.clone());
            Ok(())
        }
    }

    fn initial_record() -> CredentialRecord {
        CredentialRecord {
            id: RecordId::from("1"),
            hostname: "example.com".to_string(),
            username: "alice".to_string(),
            password: "secret".to_string(),
        }
    }

    fn controller_with(store: FakeStore) -> (DetailController<FakeStore>, Rc<FakeStore>) {
        let store = Rc::new(store);
        (
            DetailController::new(Rc::clone(&store), initial_record()),
            store,
        )
    }

    #[test]
    fn test_render_before_activate_reflects_initial_record() {
        let (ctrl, _) = controller_with(FakeStore::default());

        assert_eq!(ctrl.mode(), Mode::Viewing);
        assert!(ctrl.usage().is_none());

        let rows = ctrl.rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(
            rows[0],
            Row::Title {
                hostname: "example.com".to_string()
            }
        );
        assert!(matches!(
            &rows[1],
            Row::Input { field: Field::Username, value, editing: false, focused: false, .. }
                if value == "alice"
        ));
        assert!(matches!(
            &rows[2],
            Row::Input { field: Field::Password, value, .. } if value == "secret"
        ));
        assert!(matches!(
            &rows[3],
            Row::Input { field: Field::Website, value, .. } if value == "example.com"
        ));
        assert_eq!(rows[4], Row::Delete);
    }

    #[tokio::test]
    async fn test_activate_replaces_usage_and_leaves_record_alone() {
        let store = FakeStore::default();
        *store.usage.borrow_mut() = Some(UsageMetadata {
            password_last_changed_at: 1000,
            last_used_at: None,
        });
        let (mut ctrl, _) = controller_with(store);

        let event = ctrl.activate().await;
        let redraw = ctrl.apply_store_event(event);

        assert_eq!(redraw, Redraw::Footer);
        assert_eq!(ctrl.usage().unwrap().password_last_changed_at, 1000);
        assert_eq!(ctrl.record(), &initial_record());
    }

    #[tokio::test]
    async fn test_activate_with_empty_result_keeps_usage_none() {
        let (mut ctrl, _) = controller_with(FakeStore::default());

        let event = ctrl.activate().await;
        ctrl.apply_store_event(event);

        assert!(ctrl.usage().is_none());
    }

    #[test]
    fn test_begin_edit_focuses_username() {
        let (mut ctrl, _) = controller_with(FakeStore::default());

        let redraw = ctrl.begin_edit();

        assert_eq!(redraw, Redraw::Rows);
        assert_eq!(ctrl.mode(), Mode::Editing);
        assert_eq!(ctrl.focus(), Some(Field::Username));
    }

    #[test]
    fn test_begin_edit_idempotent() {
        let (mut ctrl, _) = controller_with(FakeStore::default());

        ctrl.begin_edit();
        ctrl.handle_submit(Field::Username);
        ctrl.begin_edit();

        assert_eq!(ctrl.mode(), Mode::Editing);
        assert_eq!(ctrl.focus(), Some(Field::Username));
        assert_eq!(ctrl.record(), &initial_record());
    }

    #[test]
    fn test_submit_walks_tab_order_then_releases() {
        let (mut ctrl, _) = controller_with(FakeStore::default());
        ctrl.begin_edit();

        assert_eq!(
            ctrl.handle_submit(Field::Username),
            SubmitOutcome::Handled(Field::Password)
        );
        assert_eq!(ctrl.focus(), Some(Field::Password));
        assert_eq!(
            ctrl.handle_submit(Field::Password),
            SubmitOutcome::Handled(Field::Website)
        );
        assert_eq!(
            ctrl.handle_submit(Field::Website),
            SubmitOutcome::Released
        );
        assert_eq!(ctrl.focus(), None);
    }

    #[tokio::test]
    async fn test_commit_replaces_record_with_authoritative_value() {
        let (mut ctrl, _store) = controller_with(FakeStore::default());
        ctrl.begin_edit();

        let (redraw, fut) = ctrl.commit_edit(
            Some("alice2".to_string()),
            Some("secret2".to_string()),
            Some("example.com".to_string()),
        );
        assert_eq!(redraw, Redraw::Rows);
        assert_eq!(ctrl.mode(), Mode::Viewing);

        if let Some(event) = fut.await {
            ctrl.apply_store_event(event);
        }

        assert_eq!(
            ctrl.record(),
            &CredentialRecord {
                id: RecordId::from("1"),
                hostname: "example.com".to_string(),
                username: "alice2".to_string(),
                password: "secret2".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_commit_is_significant_and_keeps_id() {
        let (mut ctrl, store) = controller_with(FakeStore::default());
        ctrl.begin_edit();

        let (_, fut) = ctrl.commit_edit(
            Some("bob".to_string()),
            Some("p".to_string()),
            Some("example.org".to_string()),
        );
        fut.await;

        let updates = store.updates.borrow();
        assert_eq!(updates.len(), 1);
        let (written, significant) = &updates[0];
        assert!(significant);
        assert_eq!(written.id, RecordId::from("1"));
    }

    #[tokio::test]
    async fn test_missing_captures_degrade_to_empty_not_prior_values() {
        let (mut ctrl, store) = controller_with(FakeStore::default());
        ctrl.begin_edit();

        let (_, fut) = ctrl.commit_edit(None, None, None);
        fut.await;

        let updates = store.updates.borrow();
        let (written, _) = &updates[0];
        assert_eq!(written.id, RecordId::from("1"));
        assert_eq!(written.hostname, "");
        assert_eq!(written.username, "");
        assert_eq!(written.password, "");
    }

    #[tokio::test]
    async fn test_failed_write_keeps_optimistic_record_and_skips_refetch() {
        let store = FakeStore::default();
        store.fail_update.set(true);
        let (mut ctrl, store) = controller_with(store);
        ctrl.begin_edit();

        let (_, fut) = ctrl.commit_edit(
            Some("alice2".to_string()),
            Some("secret2".to_string()),
            Some("example.com".to_string()),
        );
        let event = fut.await;

        assert!(event.is_none());
        assert_eq!(store.record_reads.get(), 0);
        assert_eq!(ctrl.mode(), Mode::Viewing);
        assert_eq!(ctrl.record().username, "alice2");
        assert_eq!(ctrl.record().password, "secret2");
    }

    #[tokio::test]
    async fn test_empty_refetch_keeps_optimistic_record() {
        let store = FakeStore::default();
        store.refetch_empty.set(true);
        let (mut ctrl, store) = controller_with(store);
        ctrl.begin_edit();

        let (_, fut) = ctrl.commit_edit(
            Some("alice2".to_string()),
            Some("secret2".to_string()),
            Some("example.com".to_string()),
        );
        let event = fut.await;

        // The write landed but the refetch came back empty
        assert!(event.is_none());
        assert_eq!(store.record_reads.get(), 1);
        assert_eq!(ctrl.record().username, "alice2");
        assert_eq!(ctrl.record().password, "secret2");
    }

    #[tokio::test]
    async fn test_end_to_end_edit_cycle() {
        let store = FakeStore::default();
        *store.usage.borrow_mut() = Some(UsageMetadata {
            password_last_changed_at: 1000,
            last_used_at: None,
        });
        let (mut ctrl, _store) = controller_with(store);

        let event = ctrl.activate().await;
        ctrl.apply_store_event(event);

        ctrl.begin_edit();
        let (_, fut) = ctrl.commit_edit(
            Some("alice2".to_string()),
            Some("secret2".to_string()),
            Some("example.com".to_string()),
        );
        if let Some(event) = fut.await {
            ctrl.apply_store_event(event);
        }

        assert_eq!(ctrl.mode(), Mode::Viewing);
        assert_eq!(ctrl.record().username, "alice2");
        assert_eq!(ctrl.record().password, "secret2");
        // Metadata is not refetched by a commit
        assert_eq!(ctrl.usage().unwrap().password_last_changed_at, 1000);
    }

    #[tokio::test]
    async fn test_unchanged_commit_still_round_trips() {
        let (mut ctrl, store) = controller_with(FakeStore::default());
        ctrl.begin_edit();

        let (_, fut) = ctrl.commit_edit(
            Some("alice".to_string()),
            Some("secret".to_string()),
            Some("example.com".to_string()),
        );
        fut.await;

        assert_eq!(store.updates.borrow().len(), 1);
        assert_eq!(store.record_reads.get(), 1);
        assert_eq!(ctrl.record(), &initial_record());
    }

    #[tokio::test]
    async fn test_overlapping_usage_fetches_last_write_wins() {
        let store = FakeStore::default();
        *store.usage.borrow_mut() = Some(UsageMetadata {
            password_last_changed_at: 1000,
            last_used_at: None,
        });
        let (mut ctrl, store) = controller_with(store);

        let e1 = ctrl.activate().await;
        *store.usage.borrow_mut() = Some(UsageMetadata {
            password_last_changed_at: 2000,
            last_used_at: None,
        });
        let e2 = ctrl.activate().await;

        // Apply in arrival order; the later completion wins
        ctrl.apply_store_event(e1);
        ctrl.apply_store_event(e2);

        assert_eq!(ctrl.usage().unwrap().password_last_changed_at, 2000);
    }

    #[test]
    fn test_rows_mark_focus_while_editing() {
        let (mut ctrl, _) = controller_with(FakeStore::default());
        ctrl.begin_edit();
        ctrl.handle_submit(Field::Username);

        let rows = ctrl.rows();
        assert!(matches!(
            rows[1],
            Row::Input { field: Field::Username, editing: true, focused: false, .. }
        ));
        assert!(matches!(
            rows[2],
            Row::Input { field: Field::Password, editing: true, focused: true, .. }
        ));
    }
}
