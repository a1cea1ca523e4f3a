use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use super::Obj;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Environment {
    pub values: RefCell<HashMap<String, Obj>>,
}

impl Environment {
    pub fn new() -> Rc<Environment> {
        Rc::new(Environment::default())
    }

    pub fn insert(&self, name: String, value: Obj) {
        self.values.borrow_mut().insert(name, value);
    }

    /// Look up a binding in this frame only.
    pub fn get_local(&self, name: &str) -> Option<Obj> {
        self.values.borrow().get(name).cloned()
    }
}
