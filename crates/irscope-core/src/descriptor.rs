//! JVM method descriptor rendering, e.g. `(I[Ljava/lang/String;)V`.

/// Return and parameter types of a method, spelled as Java source types.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MethodSignature {
    pub return_type: String,
    pub parameters: Vec<String>,
}

impl MethodSignature {
    /// Parse a descriptor. Malformed input degrades to a best-effort reading
    /// rather than failing.
    pub fn parse(descriptor: &str) -> Self {
        let (params, ret) = match (descriptor.find('('), descriptor.rfind(')')) {
            (Some(open), Some(close)) if open < close => {
                (&descriptor[open + 1..close], &descriptor[close + 1..])
            }
            (_, Some(close)) => ("", &descriptor[close + 1..]),
            (_, None) => ("", descriptor),
        };

        let return_type = if ret.is_empty() {
            "void".to_string()
        } else {
            type_display_name(ret)
        };

        Self {
            return_type,
            parameters: parameter_types(params),
        }
    }

    /// Render as `ret name(p1, p2)`.
    pub fn render(&self, method_name: &str) -> String {
        format!(
            "{} {}({})",
            self.return_type,
            method_name,
            self.parameters.join(", ")
        )
    }
}

/// Split a parameter list into single field descriptors and name each.
fn parameter_types(mut rest: &str) -> Vec<String> {
    let mut types = Vec::new();
    while !rest.is_empty() {
        let dims = rest.bytes().take_while(|b| *b == b'[').count();
        let after_dims = &rest[dims..];
        let len = match after_dims.as_bytes().first() {
            Some(b'L') => after_dims.find(';').map_or(after_dims.len(), |i| i + 1),
            Some(_) => after_dims.chars().next().map_or(0, char::len_utf8),
            None => 0,
        };
        let end = dims + len;
        types.push(type_display_name(&rest[..end]));
        rest = &rest[end..];
    }
    types
}

/// Name a single field descriptor: `I` is `int`, `Ljava/lang/String;` is
/// `java/lang/String`, each leading `[` adds `[]`. Unknown codes pass through.
pub fn type_display_name(descriptor: &str) -> String {
    if let Some(element) = descriptor.strip_prefix('[') {
        return format!("{}[]", type_display_name(element));
    }
    if let Some(class) = descriptor.strip_prefix('L') {
        return class.strip_suffix(';').unwrap_or(class).to_string();
    }
    let name = match descriptor {
        "B" => "byte",
        "C" => "char",
        "D" => "double",
        "F" => "float",
        "I" => "int",
        "J" => "long",
        "S" => "short",
        "Z" => "boolean",
        "V" => "void",
        other => {
            tracing::debug!(descriptor = other, "unsupported type descriptor");
            other
        }
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_mixed_parameters() {
        let sig = MethodSignature::parse("(I[Ljava/lang/String;)V");
        assert_eq!(sig.render("m"), "void m(int, java/lang/String[])");
    }

    #[test]
    fn test_primitive_names() {
        let sig = MethodSignature::parse("(BCDFIJSZ)J");
        assert_eq!(
            sig.parameters,
            vec!["byte", "char", "double", "float", "int", "long", "short", "boolean"]
        );
        assert_eq!(sig.return_type, "long");
    }

    #[test]
    fn test_nested_arrays_and_class_return() {
        let sig = MethodSignature::parse("([[I)Ljava/lang/Object;");
        assert_eq!(sig.parameters, vec!["int[][]"]);
        assert_eq!(sig.return_type, "java/lang/Object");
    }

    #[test]
    fn test_empty_return_is_void() {
        let sig = MethodSignature::parse("()");
        assert_eq!(sig.render("run"), "void run()");
    }

    #[test]
    fn test_malformed_descriptor_does_not_panic() {
        let sig = MethodSignature::parse("(Ljava/lang/String");
        assert_eq!(sig.return_type, "(Ljava/lang/String");
        let sig = MethodSignature::parse("(L)V");
        assert_eq!(sig.parameters, vec![""]);
        assert_eq!(MethodSignature::parse("").return_type, "void");
    }
}
