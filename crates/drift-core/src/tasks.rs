//! Cancellable per-entity animation tasks driven by the master frame tick.
//!
//! Every task belongs to an owner. Cancelling an owner clears the liveness
//! flag of exactly that owner's tasks; dead tasks never step again and are
//! dropped on the next tick, so nothing outlives the entity it animates.

use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Finished,
}

pub trait Task<Ctx: ?Sized> {
    fn step(&mut self, ctx: &Ctx) -> TaskStatus;
}

struct Entry<O, T> {
    owner: O,
    alive: bool,
    task: T,
}

pub struct TaskSet<O, T> {
    next_id: u64,
    entries: FnvHashMap<TaskId, Entry<O, T>>,
}

impl<O, T> Default for TaskSet<O, T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: FnvHashMap::default(),
        }
    }
}

impl<O: Copy + PartialEq, T> TaskSet<O, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, owner: O, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            id,
            Entry {
                owner,
                alive: true,
                task,
            },
        );
        id
    }

    /// Clears the liveness flag of every task owned by `owner`; returns how many.
    pub fn cancel_owner(&mut self, owner: O) -> usize {
        let mut n = 0;
        for e in self.entries.values_mut() {
            if e.alive && e.owner == owner {
                e.alive = false;
                n += 1;
            }
        }
        n
    }

    pub fn is_alive(&self, id: TaskId) -> bool {
        self.entries.get(&id).map(|e| e.alive).unwrap_or(false)
    }

    /// Steps every live task once, then drops dead and finished ones.
    pub fn tick<Ctx: ?Sized>(&mut self, ctx: &Ctx)
    where
        T: Task<Ctx>,
    {
        for e in self.entries.values_mut() {
            if e.alive && e.task.step(ctx) == TaskStatus::Finished {
                e.alive = false;
            }
        }
        self.entries.retain(|_, e| e.alive);
    }

    /// Live tasks, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &T)> + '_ {
        self.entries
            .iter()
            .filter(|(_, e)| e.alive)
            .map(|(id, e)| (*id, &e.task))
    }

    /// Live tasks of one owner.
    pub fn owned_by(&self, owner: O) -> impl Iterator<Item = &T> + '_ {
        self.entries
            .values()
            .filter(move |e| e.alive && e.owner == owner)
            .map(|e| &e.task)
    }

    /// Number of stored tasks, including cancelled ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
