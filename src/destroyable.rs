// implemented by long-lived subscribers; Rc cycles through the event
// channels must be broken by hand before the owner can be dropped
pub trait Destroyable {
    fn destroy(&mut self);
}
