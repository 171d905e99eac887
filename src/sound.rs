/// Where the sound timer's beep goes.
pub trait Sound {
    fn beep(&mut self);
}

pub struct Mute;

impl Sound for Mute {
    fn beep(&mut self) {}
}

/// Counts beeps. Clones share the count.
#[cfg(test)]
#[derive(Default, Clone)]
pub(crate) struct BeepCounter {
    count: std::rc::Rc<std::cell::Cell<usize>>,
}

#[cfg(test)]
impl BeepCounter {
    pub(crate) fn count(&self) -> usize {
        self.count.get()
    }
}

#[cfg(test)]
impl Sound for BeepCounter {
    fn beep(&mut self) {
        self.count.set(self.count.get() + 1);
    }
}
