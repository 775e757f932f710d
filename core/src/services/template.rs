//! Placeholder substitution for SMS message templates
//!
//! A deliberately small, pure renderer: five recognized tags, no escaping,
//! no error paths. Unrecognized `{{x}}` tags pass through verbatim so a
//! message mentioning literal braces is never mangled.

use crate::domain::entities::member::Member;

/// Substitute recipient placeholders into a message template.
///
/// Recognized tags: `{{name}}` (first whitespace-delimited token of the
/// member's name), `{{phone}}`, `{{department}}`, `{{gender}}`,
/// `{{status}}`. Missing fields render as the empty string.
pub fn render(template: &str, member: &Member) -> String {
    template
        .replace("{{name}}", member.first_name())
        .replace("{{phone}}", &member.phone)
        .replace("{{department}}", &member.department)
        .replace("{{gender}}", &member.gender)
        .replace("{{status}}", &member.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::member::Member;
    use uuid::Uuid;

    fn member() -> Member {
        Member {
            id: Uuid::new_v4(),
            name: "John Doe".to_string(),
            phone: "+2348012345678".to_string(),
            gender: "Male".to_string(),
            department: "Choir".to_string(),
            birthday: Some("1990-03-15".to_string()),
            status: "Active".to_string(),
        }
    }

    #[test]
    fn substitutes_all_recognized_tags() {
        let out = render(
            "Hi {{name}} ({{gender}}, {{department}}, {{status}}) at {{phone}}",
            &member(),
        );
        assert_eq!(out, "Hi John (Male, Choir, Active) at +2348012345678");
    }

    #[test]
    fn name_uses_first_token_only() {
        let out = render("Happy Birthday {{name}}!", &member());
        assert_eq!(out, "Happy Birthday John!");
    }

    #[test]
    fn repeated_tags_are_all_replaced() {
        let out = render("{{name}} {{name}} {{name}}", &member());
        assert_eq!(out, "John John John");
    }

    #[test]
    fn unrecognized_tags_pass_through() {
        let out = render("Hello {{name}}, ref {{ticket}}", &member());
        assert_eq!(out, "Hello John, ref {{ticket}}");
    }

    #[test]
    fn empty_name_renders_empty_first_name() {
        let mut m = member();
        m.name = "   ".to_string();
        assert_eq!(render("Hi {{name}}!", &m), "Hi !");
    }

    #[test]
    fn rendering_is_idempotent_when_output_has_no_tags() {
        let m = member();
        let once = render("Happy Birthday {{name}}!", &m);
        let twice = render(&once, &m);
        assert_eq!(once, twice);
    }
}
