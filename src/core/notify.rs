//! Fire-and-forget user notifications

pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
}
