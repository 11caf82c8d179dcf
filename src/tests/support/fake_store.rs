// In-memory store that behaves like the real one for everything the client
// relies on. Compiled into both the unit tests and the integration tests; the
// including module provides the model and store imports.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use super::*;

pub const SET_SIZE: usize = 3;

#[derive(Default)]
struct State {
    categories: Vec<Category>,
    active: Vec<Item>,
    completed: Vec<Item>,
    last_sets: HashMap<Category, Vec<ItemId>>,
    next_id: u32,
    draws: usize,
}

#[derive(Default)]
pub struct FakeStore {
    state: RefCell<State>,
    calls: RefCell<Vec<String>>,
    failures: RefCell<HashMap<String, VecDeque<String>>>,
}

fn today() -> time::Date {
    time::Date::from_calendar_date(2024, time::Month::March, 1).unwrap()
}

fn not_found(what: &str) -> StoreError {
    StoreError::new(format!("Could not find category: {}", what))
}

impl FakeStore {
    pub fn with_categories(names: &[&str]) -> Self {
        let store = Self::default();
        store.state.borrow_mut().categories = names.iter().map(|n| Category::from(*n)).collect();
        store.state.borrow_mut().next_id = 1;
        store
    }

    /// Put an active item straight into the store, bypassing the call log.
    pub fn seed_item(&self, title: &str, category: &str, priority: Priority) -> ItemId {
        let mut st = self.state.borrow_mut();
        st.next_id = st.next_id.max(1);
        let id = ItemId(st.next_id);
        st.next_id += 1;
        st.active.push(Item {
            id,
            title: title.to_string(),
            category: Category::from(category),
            priority,
            added: today(),
            completed: None,
        });
        id
    }

    pub fn categories(&self) -> Vec<Category> {
        self.state.borrow().categories.clone()
    }

    pub fn active(&self) -> Vec<Item> {
        self.state.borrow().active.clone()
    }

    pub fn completed(&self) -> Vec<Item> {
        self.state.borrow().completed.clone()
    }

    /// Change the store behind the client's back.
    pub fn external_add_category(&self, name: &str) {
        self.state.borrow_mut().categories.push(Category::from(name));
    }

    /// Make the next call to `op` fail with `msg`.
    pub fn fail_next(&self, op: &str, msg: &str) {
        self.failures
            .borrow_mut()
            .entry(op.to_string())
            .or_default()
            .push_back(msg.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn enter(&self, op: &str) -> Result<(), StoreError> {
        self.calls.borrow_mut().push(op.to_string());
        match self.failures.borrow_mut().get_mut(op).and_then(|q| q.pop_front()) {
            Some(msg) => Err(StoreError::new(msg)),
            None => Ok(()),
        }
    }

    fn canonical(st: &State, name: &str) -> Option<Category> {
        st.categories.iter().find(|c| c.same_name(name)).cloned()
    }

    fn filtered(st: &State, items: &[Item], category: Option<&Category>) -> Result<Vec<Item>, StoreError> {
        match category {
            None => Ok(items.to_vec()),
            Some(c) => {
                let c = Self::canonical(st, c.as_str()).ok_or_else(|| not_found(c.as_str()))?;
                Ok(items.iter().filter(|i| i.category == c).cloned().collect())
            }
        }
    }
}

impl RemoteStore for FakeStore {
    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.enter("list_categories")?;
        Ok(self.state.borrow().categories.clone())
    }

    fn add_category(&self, name: &Category) -> Result<(), StoreError> {
        self.enter("add_category")?;
        let mut st = self.state.borrow_mut();
        if name.is_blank() {
            return Err(StoreError::new("Category is required for this operation"));
        }
        if Self::canonical(&st, name.as_str()).is_some() {
            return Err(StoreError::new(format!("Category already exists: {}", name)));
        }
        st.categories.push(name.clone());
        Ok(())
    }

    fn rename_category(&self, old: &Category, new: &Category) -> Result<(), StoreError> {
        self.enter("rename_category")?;
        let mut st = self.state.borrow_mut();
        let old = Self::canonical(&st, old.as_str()).ok_or_else(|| not_found(old.as_str()))?;
        if Self::canonical(&st, new.as_str()).is_some() {
            return Err(StoreError::new(format!("Category already exists: {}", new)));
        }
        for c in st.categories.iter_mut().filter(|c| **c == old) {
            *c = new.clone();
        }
        for i in st.active.iter_mut().filter(|i| i.category == old) {
            i.category = new.clone();
        }
        st.last_sets.remove(&old);
        Ok(())
    }

    fn delete_category(&self, name: &Category, migrate_to: Option<&Category>) -> Result<(), StoreError> {
        self.enter("delete_category")?;
        let mut st = self.state.borrow_mut();
        let name = Self::canonical(&st, name.as_str()).ok_or_else(|| not_found(name.as_str()))?;
        let target = match migrate_to {
            Some(to) => {
                let to = Self::canonical(&st, to.as_str()).ok_or_else(|| not_found(to.as_str()))?;
                if to == name {
                    return Err(not_found(to.as_str()));
                }
                Some(to)
            }
            None => None,
        };
        st.categories.retain(|c| *c != name);
        match target {
            Some(to) => {
                for i in st.active.iter_mut().filter(|i| i.category == name) {
                    i.category = to.clone();
                }
            }
            None => st.active.retain(|i| i.category != name),
        }
        st.last_sets.remove(&name);
        Ok(())
    }

    fn list_active_items(&self, category: Option<&Category>) -> Result<Vec<Item>, StoreError> {
        self.enter("list_active_items")?;
        let st = self.state.borrow();
        Self::filtered(&st, &st.active, category)
    }

    fn list_completed_items(&self, category: Option<&Category>) -> Result<Vec<Item>, StoreError> {
        self.enter("list_completed_items")?;
        let st = self.state.borrow();
        Self::filtered(&st, &st.completed, category)
    }

    /// Deterministic stand-in for the weighted draw: each fresh draw starts one
    /// position further along the category's items.
    fn random_set(&self, category: &Category, sticky: bool) -> Result<Vec<Item>, StoreError> {
        self.enter(if sticky { "random_set_sticky" } else { "random_set_new" })?;
        let mut st = self.state.borrow_mut();
        let candidates = Self::filtered(&st, &st.active, Some(category))?;
        let category = Self::canonical(&st, category.as_str()).ok_or_else(|| not_found(category.as_str()))?;
        let size = SET_SIZE.min(candidates.len());

        let mut chosen: Vec<ItemId> = Vec::new();
        if sticky {
            if let Some(last) = st.last_sets.get(&category) {
                chosen.extend(last.iter().filter(|id| candidates.iter().any(|c| c.id == **id)));
            }
        }
        if chosen.len() < size {
            let start = st.draws % candidates.len();
            st.draws += 1;
            for c in candidates.iter().cycle().skip(start).take(candidates.len()) {
                if chosen.len() >= size {
                    break;
                }
                if !chosen.contains(&c.id) {
                    chosen.push(c.id);
                }
            }
        }
        st.last_sets.insert(category, chosen.clone());
        Ok(chosen
            .iter()
            .filter_map(|id| candidates.iter().find(|c| c.id == *id).cloned())
            .collect())
    }

    fn save_item(&self, draft: &ItemDraft, ignore_duplicate: bool) -> Result<(), StoreError> {
        self.enter("save_item")?;
        let mut st = self.state.borrow_mut();
        if draft.title.trim().is_empty() {
            return Err(StoreError::new("Title is required for this operation"));
        }
        if let Some(id) = draft.id {
            if !st.active.iter().any(|i| i.id == id) {
                return Err(StoreError::new(format!("Could not find ID: {}", id)));
            }
        }
        let category = Self::canonical(&st, draft.category.as_str())
            .ok_or_else(|| not_found(draft.category.as_str()))?;
        if !ignore_duplicate {
            let clash = st
                .active
                .iter()
                .chain(st.completed.iter())
                .any(|i| i.title.eq_ignore_ascii_case(&draft.title) && Some(i.id) != draft.id);
            if clash {
                return Err(StoreError::new(format!("Title already exists: {}", draft.title)));
            }
        }
        match draft.id {
            Some(id) => {
                if let Some(item) = st.active.iter_mut().find(|i| i.id == id) {
                    item.title = draft.title.clone();
                    item.category = category;
                    item.priority = draft.priority;
                }
            }
            None => {
                st.next_id = st.next_id.max(1);
                let id = ItemId(st.next_id);
                st.next_id += 1;
                st.active.push(Item {
                    id,
                    title: draft.title.clone(),
                    category,
                    priority: draft.priority,
                    added: today(),
                    completed: None,
                });
            }
        }
        Ok(())
    }

    fn delete_item(&self, id: ItemId) -> Result<(), StoreError> {
        self.enter("delete_item")?;
        let mut st = self.state.borrow_mut();
        let before = st.active.len() + st.completed.len();
        st.active.retain(|i| i.id != id);
        st.completed.retain(|i| i.id != id);
        if st.active.len() + st.completed.len() == before {
            return Err(StoreError::new(format!("Could not find ID: {}", id)));
        }
        Ok(())
    }

    fn set_completed(&self, id: ItemId, unmark: bool) -> Result<(), StoreError> {
        self.enter(if unmark { "unmark_item" } else { "complete_item" })?;
        let mut st = self.state.borrow_mut();
        let (from, to) = if unmark {
            let pos = st.completed.iter().position(|i| i.id == id);
            (pos, false)
        } else {
            let pos = st.active.iter().position(|i| i.id == id);
            (pos, true)
        };
        let Some(pos) = from else {
            return Err(StoreError::new(format!("Could not find ID: {}", id)));
        };
        if to {
            let mut item = st.active.remove(pos);
            item.completed = Some(today());
            st.completed.push(item);
        } else {
            let mut item = st.completed.remove(pos);
            item.completed = None;
            st.active.push(item);
        }
        Ok(())
    }
}
