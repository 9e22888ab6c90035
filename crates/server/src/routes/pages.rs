use axum::{extract::State, response::Html};
use maud::{html, DOCTYPE};
use models::user::User;

use crate::errors::JsonApiError;
use crate::routes::AppState;

pub async fn users_html(State(state): State<AppState>) -> Result<Html<String>, JsonApiError> {
    let users = state.users.list().await?;
    Ok(Html(render_users(&users)))
}

pub fn render_users(users: &[User]) -> String {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Users" }
            }
            body {
                h1 { "Users" }
                @if users.is_empty() {
                    p class="empty" { "No users yet." }
                } @else {
                    table {
                        thead {
                            tr { th { "Name" } th { "Phone" } th { "Favourite colour" } }
                        }
                        tbody {
                            @for u in users {
                                tr {
                                    td { (u.name) }
                                    td { (u.phone) }
                                    td { (u.fave_color) }
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    markup.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_row_per_user() {
        let page = render_users(&[User::new("Ann", 555, "blue"), User::new("Bob", 7, "red")]);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert_eq!(page.matches("<tr>").count(), 3);
        assert!(page.contains("<td>Ann</td><td>555</td><td>blue</td>"));
    }

    #[test]
    fn escapes_user_text() {
        let page = render_users(&[User::new("<script>x</script>", 1, "a&b")]);
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains("a&amp;b"));
    }

    #[test]
    fn empty_list_has_placeholder() {
        let page = render_users(&[]);
        assert!(page.contains("No users yet."));
        assert!(!page.contains("<table>"));
    }
}
