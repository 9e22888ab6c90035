pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn welcome_message_text() {
        let w = types::Welcome::default();
        assert_eq!(w.message, "Welcome to this fantastic app!");
    }
}
