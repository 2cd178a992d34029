//! `<testcase>` fragments for the sponge test-result service.

use quick_xml::escape::escape;
use std::fmt;

/// Outcome of a single reported test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub passed: bool,
    pub message: String,
}

impl TestCase {
    pub fn new(name: impl Into<String>, passed: bool, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            message: message.into(),
        }
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = escape(self.message.as_str());
        write!(
            f,
            "<testcase name=\"{}\" status=\"run\" time=\"0.5\"> ",
            escape(self.name.as_str())
        )?;
        if self.passed {
            write!(
                f,
                "<properties> <property name=\"test_output\" value=\"{message}\"/> </properties>"
            )?;
        } else {
            write!(f, "<failure message=\"{message}\"/>")?;
        }
        write!(f, " </testcase>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passed_case_carries_output_property() {
        let tc = TestCase::new("boot", true, "all good");
        assert_eq!(
            tc.to_string(),
            "<testcase name=\"boot\" status=\"run\" time=\"0.5\"> \
             <properties> <property name=\"test_output\" value=\"all good\"/> </properties> \
             </testcase>"
        );
    }

    #[test]
    fn failed_case_carries_failure_message() {
        let tc = TestCase::new("load_module", false, "insmod failed");
        assert_eq!(
            tc.to_string(),
            "<testcase name=\"load_module\" status=\"run\" time=\"0.5\"> \
             <failure message=\"insmod failed\"/> </testcase>"
        );
    }

    #[test]
    fn attributes_are_escaped() {
        let tc = TestCase::new("a<b>", false, "say \"hi\" & 'bye'");
        let s = tc.to_string();
        assert!(s.contains("name=\"a&lt;b&gt;\""));
        assert!(s.contains("message=\"say &quot;hi&quot; &amp; &apos;bye&apos;\""));
    }
}
