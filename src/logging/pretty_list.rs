use std::fmt;

/// Formats a slice as a markdown-style list so long lists of names read well
/// inside multiline logs.
pub struct PrettyList<'data, T>(pub &'data [T]);

impl<'data, T> PrettyList<'data, T> {
    fn write_entries(
        &self,
        f: &mut fmt::Formatter<'_>,
        write_entry: impl Fn(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
    ) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str(" (none)");
        }
        for entry in self.0 {
            f.write_str("\n- ")?;
            write_entry(f, entry)?;
        }
        Ok(())
    }
}

impl<'data, T> fmt::Debug for PrettyList<'data, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alternate = f.alternate();
        self.write_entries(f, |f, entry| {
            if alternate {
                write!(f, "{:#?}", entry)
            } else {
                write!(f, "{:?}", entry)
            }
        })
    }
}

impl<'data, T> fmt::Display for PrettyList<'data, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_entries(f, |f, entry| write!(f, "{}", entry))
    }
}

#[cfg(test)]
mod test {
    use super::PrettyList;

    #[test]
    fn lists_each_entry_on_its_own_line() {
        let names = ["VK_KHR_surface", "VK_EXT_debug_utils"];
        assert_eq!(
            format!("{}", PrettyList(&names)),
            "\n- VK_KHR_surface\n- VK_EXT_debug_utils"
        );
    }

    #[test]
    fn empty_lists_say_so() {
        let names: [&str; 0] = [];
        assert_eq!(format!("{:?}", PrettyList(&names)), " (none)");
    }
}
