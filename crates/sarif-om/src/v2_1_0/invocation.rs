//! Tool invocations and the notifications they produce.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::{
    list::NodeList,
    property_bag::PropertyBag,
    v2_1_0::{
        ArtifactLocation, ConfigurationOverride, FailureLevel, Location, Message,
        ReportingDescriptorReference, Stack,
    },
};

sarif_node! {
    /// The runtime environment of the analysis tool run.
    pub struct Invocation {
        /// The command line used to invoke the tool.
        pub command_line: Option<String>,
        /// An array of strings, containing in order the command line arguments passed to the tool from the operating system.
        pub arguments: Option<Vec<String>>,
        /// The locations of any response files specified on the tool's command line.
        pub response_files: Option<NodeList<ArtifactLocation>>,
        /// The Coordinated Universal Time (UTC) date and time at which the invocation started.
        pub start_time_utc: Option<DateTime<Utc>>,
        /// The Coordinated Universal Time (UTC) date and time at which the invocation ended.
        pub end_time_utc: Option<DateTime<Utc>>,
        /// The process exit code.
        pub exit_code: Option<i64>,
        /// An array of configurationOverride objects that describe rules related runtime overrides.
        pub rule_configuration_overrides: Option<NodeList<ConfigurationOverride>>,
        /// An array of configurationOverride objects that describe notifications related runtime overrides.
        pub notification_configuration_overrides: Option<NodeList<ConfigurationOverride>>,
        /// A list of runtime conditions detected by the tool during the analysis.
        pub tool_execution_notifications: Option<NodeList<Notification>>,
        /// A list of conditions detected by the tool that are relevant to the tool's configuration.
        pub tool_configuration_notifications: Option<NodeList<Notification>>,
        /// The reason for the process exit.
        pub exit_code_description: Option<String>,
        /// The name of the signal that caused the process to exit.
        pub exit_signal_name: Option<String>,
        /// The numeric value of the signal that caused the process to exit.
        pub exit_signal_number: Option<i64>,
        /// The reason given by the operating system that the process failed to start.
        pub process_start_failure_message: Option<String>,
        /// Specifies whether the tool's execution completed successfully.
        pub execution_successful: bool,
        /// The machine on which the invocation occurred.
        pub machine: Option<String>,
        /// The account under which the invocation occurred.
        pub account: Option<String>,
        /// The id of the process in which the invocation occurred.
        pub process_id: Option<i64>,
        /// An absolute URI specifying the location of the executable that was invoked.
        pub executable_location: Option<ArtifactLocation>,
        /// The working directory for the invocation.
        pub working_directory: Option<ArtifactLocation>,
        /// The environment variables associated with the analysis tool process, expressed as key/value pairs.
        pub environment_variables: Option<IndexMap<String, String>>,
        /// A file containing the standard input stream to the process that was invoked.
        pub stdin: Option<ArtifactLocation>,
        /// A file containing the standard output stream from the process that was invoked.
        pub stdout: Option<ArtifactLocation>,
        /// A file containing the standard error stream from the process that was invoked.
        pub stderr: Option<ArtifactLocation>,
        /// A file containing the interleaved standard output and standard error stream from the process that was invoked.
        pub stdout_stderr: Option<ArtifactLocation>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Describes a condition relevant to the tool itself, as opposed to being relevant to a target being analyzed by the tool.
    pub struct Notification {
        /// The locations relevant to this notification.
        pub locations: Option<NodeList<Location>>,
        /// A message that describes the condition that was encountered.
        pub message: Message,
        /// A value specifying the severity level of the notification.
        pub level: Option<FailureLevel>,
        /// The thread identifier of the code that generated the notification.
        pub thread_id: Option<i64>,
        /// The Coordinated Universal Time (UTC) date and time at which the analysis tool generated the notification.
        pub time_utc: Option<DateTime<Utc>>,
        /// The runtime exception, if any, relevant to this notification.
        pub exception: Option<Exception>,
        /// A reference used to locate the descriptor relevant to this notification.
        pub descriptor: Option<ReportingDescriptorReference>,
        /// A reference used to locate the rule descriptor associated with this notification.
        pub associated_rule: Option<ReportingDescriptorReference>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Describes a runtime exception encountered during the execution of an analysis tool.
    pub struct Exception {
        /// A string that identifies the kind of exception, for example, the fully qualified type
        /// name of an object that was thrown, or the symbolic name of a signal.
        pub kind: Option<String>,
        /// A message that describes the exception.
        pub message: Option<String>,
        /// The sequence of function calls leading to the exception.
        pub stack: Option<Stack>,
        /// An array of exception objects each of which is considered a cause of this exception.
        pub inner_exceptions: Option<NodeList<Exception>>,
        pub properties: Option<PropertyBag>,
    }
}

impl Invocation {
    /// Creates an invocation with the given outcome.
    pub fn new(execution_successful: bool) -> Self {
        Self {
            execution_successful,
            ..Default::default()
        }
    }

    /// Iterates over both execution and configuration notifications, skipping null slots.
    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.tool_execution_notifications
            .iter()
            .chain(self.tool_configuration_notifications.iter())
            .flat_map(|list| list.iter())
    }
}

impl Notification {
    /// Creates a notification with the given `message`.
    pub fn new(message: impl Into<Message>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Returns the notification's level, defaulting to [`FailureLevel::Warning`].
    pub fn effective_level(&self) -> FailureLevel {
        self.level.unwrap_or(FailureLevel::Warning)
    }
}

#[cfg(test)]
mod tests {
    use super::{Exception, Invocation, Notification};
    use crate::{list::NodeList, v2_1_0::FailureLevel};

    #[test]
    fn test_execution_successful_is_always_written() {
        insta::assert_snapshot!(
            serde_json::to_string(&Invocation::new(false)).unwrap(),
            @r#"{"executionSuccessful":false}"#
        );
    }

    #[test]
    fn test_notifications() {
        let mut invocation = Invocation::new(true);
        invocation.tool_execution_notifications = Some(NodeList::from(vec![
            Some(Notification::new("first")),
            None,
        ]));
        invocation.tool_configuration_notifications = Some(NodeList::from([Notification {
            level: Some(FailureLevel::Error),
            ..Notification::new("second")
        }]));

        let levels = invocation
            .notifications()
            .map(|n| n.effective_level())
            .collect::<Vec<_>>();
        assert_eq!(levels, [FailureLevel::Warning, FailureLevel::Error]);
    }

    #[test]
    fn test_nested_exceptions() {
        let exception = Exception {
            kind: Some("System.IO.IOException".into()),
            inner_exceptions: Some(NodeList::from([Exception {
                message: Some("disk full".into()),
                ..Default::default()
            }])),
            ..Default::default()
        };

        let copy = exception.clone();
        assert_eq!(exception, copy);
        assert_ne!(exception, Exception::default());
    }
}
