use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::error::Error;
use crate::internal_err;
use crate::lang::{EvalResult, Signal};
use crate::object::Obj;
use crate::trace::trace;

use super::mode::{Mode, Operator};
use super::operand::{ContainerClass, IndexOperand, OperandClass};

pub const DEFAULT_POLYMORPHIC_LIMIT: usize = 4;

/// How a call site reacts to an operand shape it has not seen
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CachePolicy {
    /// Keep only the latest specialization
    Monomorphic,
    /// Keep up to `limit` specializations, then stop caching
    Polymorphic { limit: usize },
}

impl Default for CachePolicy {
    fn default() -> Self {
        CachePolicy::Polymorphic {
            limit: DEFAULT_POLYMORPHIC_LIMIT,
        }
    }
}

impl FromStr for CachePolicy {
    type Err = Signal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            None if s == "monomorphic" => Ok(CachePolicy::Monomorphic),
            None if s == "polymorphic" => Ok(CachePolicy::default()),
            Some(("polymorphic", limit)) => match limit.trim().parse::<usize>() {
                Ok(limit) => Ok(CachePolicy::Polymorphic { limit }),
                Err(_) => Error::Other(format!("invalid polymorphic cache limit '{limit}'")).into(),
            },
            _ => Error::Other(format!("unknown cache policy '{s}'")).into(),
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CachePolicy::Monomorphic => write!(f, "monomorphic"),
            CachePolicy::Polymorphic { limit } => write!(f, "polymorphic={limit}"),
        }
    }
}

const SELECTED_UNSEEN: u8 = 0;
const SELECTED_ONE: u8 = 1;
const SELECTED_VARIES: u8 = 2;

/// Executor specialized for one signature
///
/// A signature is the container's shape class, each operand's shape class
/// and the mode flags. Once installed, a specialization is shared and only
/// ever read, apart from its monotone profiles and its lazily created
/// names extractors.
///
#[derive(Debug)]
pub struct Specialization {
    container: ContainerClass,
    operands: Box<[OperandClass]>,
    mode: Mode,

    /// Extractors for `names` (axis 0 of a single subscript) or for the
    /// `dimnames` of each axis
    names_sites: Box<[OnceLock<Box<Specialization>>]>,

    /// Selected count seen so far, one of the `SELECTED_*` states
    selected: AtomicU8,
    /// Whether names or dimensions were ever attached to a result
    metadata_applied: AtomicBool,
}

impl Specialization {
    pub fn new(container: ContainerClass, operands: Box<[OperandClass]>, mode: Mode) -> Self {
        let names_sites = (0..operands.len()).map(|_| OnceLock::new()).collect();
        Specialization {
            container,
            operands,
            mode,
            names_sites,
            selected: AtomicU8::new(SELECTED_UNSEEN),
            metadata_applied: AtomicBool::new(false),
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn matches(&self, container: &ContainerClass, operands: &[IndexOperand], mode: &Mode) -> bool {
        self.container == *container
            && self.mode == *mode
            && self.operands.len() == operands.len()
            && self.operands.iter().zip(operands).all(|(c, o)| *c == o.class())
    }

    /// Extractor applied to the names of `axis`, created on first use.
    pub fn names_site(&self, axis: usize) -> Result<&Specialization, Signal> {
        let Some(site) = self.names_sites.get(axis) else {
            return internal_err!(format!("no names extractor for axis {axis}"));
        };

        let site = site.get_or_init(|| {
            let container = ContainerClass::Vector {
                kind: crate::object::VectorKind::Character,
                list: None,
                rank: 0,
            };
            let mode = Mode::new(Operator::Subset, true, self.mode.drop);
            Box::new(Specialization::new(container, Box::new([OperandClass::IntVec]), mode))
        });

        Ok(site)
    }

    /// Record a selected count, returning whether every count recorded so
    /// far was one.
    pub fn profile_selected(&self, count: usize) -> bool {
        let state = if count == 1 {
            SELECTED_ONE
        } else {
            SELECTED_VARIES
        };
        let previous = self.selected.fetch_max(state, Ordering::AcqRel);
        previous.max(state) == SELECTED_ONE
    }

    pub fn mark_metadata_applied(&self) {
        self.metadata_applied.store(true, Ordering::Release);
    }

    pub fn metadata_applied(&self) -> bool {
        self.metadata_applied.load(Ordering::Acquire)
    }
}

/// Observable state of a call site's cache
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub installed: usize,
    pub evicted: usize,
    pub entries: usize,
    pub megamorphic: bool,
}

/// One static occurrence of a subscript expression
///
/// Holds a polymorphic inline cache of specializations. A miss builds the
/// new specialization before taking the write lock and then installs it
/// whole, so a reader sees either the old table or the new one.
///
#[derive(Debug)]
pub struct CallSite {
    operator: Operator,
    policy: CachePolicy,
    entries: RwLock<Vec<Arc<Specialization>>>,
    megamorphic: AtomicBool,

    hits: AtomicUsize,
    misses: AtomicUsize,
    installed: AtomicUsize,
    evicted: AtomicUsize,
}

impl CallSite {
    pub fn new(operator: Operator) -> Self {
        CallSite::with_policy(operator, CachePolicy::default())
    }

    pub fn with_policy(operator: Operator, policy: CachePolicy) -> Self {
        CallSite {
            operator,
            policy,
            entries: RwLock::new(Vec::new()),
            megamorphic: AtomicBool::new(false),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            installed: AtomicUsize::new(0),
            evicted: AtomicUsize::new(0),
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Evaluate `x[...]` or `x[[...]]`
    pub fn extract(&self, x: &Obj, indices: &[IndexOperand], exact: bool, drop: bool) -> EvalResult {
        if self.operator.is_assignment() {
            return internal_err!(format!("'{}' call site used for extraction", self.operator));
        }

        let missing = [IndexOperand::Missing];
        let indices = if indices.is_empty() { &missing } else { indices };

        let mode = Mode::new(self.operator, exact, drop);
        let specialization = self.specialization(ContainerClass::from(x), indices, mode);
        specialization.extract(x, indices)
    }

    /// Evaluate `x[...] <- value` or `x[[...]] <- value`, returning the
    /// updated container.
    pub fn assign(&self, x: Obj, indices: &[IndexOperand], value: Obj, exact: bool) -> EvalResult {
        if !self.operator.is_assignment() {
            return internal_err!(format!("'{}' call site used for assignment", self.operator));
        }

        let missing = [IndexOperand::Missing];
        let indices = if indices.is_empty() { &missing } else { indices };

        let mode = Mode::new(self.operator, exact, true);
        let specialization = self.specialization(ContainerClass::from(&x), indices, mode);
        specialization.assign(x, indices, value)
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            installed: self.installed.load(Ordering::Relaxed),
            evicted: self.evicted.load(Ordering::Relaxed),
            entries: entries.len(),
            megamorphic: self.megamorphic.load(Ordering::Acquire),
        }
    }

    fn lookup(&self, container: &ContainerClass, indices: &[IndexOperand], mode: &Mode) -> Option<Arc<Specialization>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .find(|s| s.matches(container, indices, mode))
            .cloned()
    }

    fn specialization(&self, container: ContainerClass, indices: &[IndexOperand], mode: Mode) -> Arc<Specialization> {
        if let Some(hit) = self.lookup(&container, indices, &mode) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!("hit", site = self.operator, container = container);
            return hit;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!("miss", site = self.operator, container = container, operands = indices.len());

        let operands = indices.iter().map(IndexOperand::class).collect();
        let specialization = Arc::new(Specialization::new(container, operands, mode));

        // past the polymorphic limit every miss takes the generic path
        if self.megamorphic.load(Ordering::Acquire) {
            return specialization;
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        // another thread may have installed the same signature meanwhile
        if let Some(existing) = entries.iter().find(|s| s.matches(&container, indices, &mode)) {
            return existing.clone();
        }

        match self.policy {
            CachePolicy::Monomorphic => {
                if !entries.is_empty() {
                    self.evicted.fetch_add(entries.len(), Ordering::Relaxed);
                    trace!("evict", site = self.operator, entries = entries.len());
                }
                *entries = vec![specialization.clone()];
            }
            CachePolicy::Polymorphic { limit } if entries.len() < limit => {
                entries.push(specialization.clone());
            }
            CachePolicy::Polymorphic { .. } => {
                self.megamorphic.store(true, Ordering::Release);
                trace!("megamorphic", site = self.operator, policy = self.policy);
                return specialization;
            }
        }

        self.installed.fetch_add(1, Ordering::Relaxed);
        trace!("install", site = self.operator, entries = entries.len());
        specialization
    }
}
