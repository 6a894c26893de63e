//! Code flows, thread flows and call stacks.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    list::NodeList,
    property_bag::PropertyBag,
    v2_1_0::{
        Location, Message, MultiformatMessageString, ReportingDescriptorReference, WebRequest,
        WebResponse,
    },
    wire::Sentinel,
};

/// Specifies the importance of a thread flow location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum ThreadFlowLocationImportance {
    Important,
    Essential,
    Unimportant,
}

leaf!(hash = std: ThreadFlowLocationImportance);

sarif_node! {
    /// A set of threadFlows which together describe a pattern of code execution relevant to detecting a result.
    pub struct CodeFlow {
        /// A message relevant to the code flow.
        pub message: Option<Message>,
        /// An array of one or more unique threadFlow objects, each of which describes the progress
        /// of a program through a thread of execution.
        pub thread_flows: NodeList<ThreadFlow>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Describes a sequence of code locations that specify a path through a single thread of execution such as an operating system or fiber.
    pub struct ThreadFlow {
        /// A string that uniquely identifies the threadFlow within the codeFlow in which it occurs.
        pub id: Option<String>,
        /// A message relevant to the thread flow.
        pub message: Option<Message>,
        /// Values of relevant expressions at the start of the thread flow that may change during thread flow execution.
        pub initial_state: Option<IndexMap<String, MultiformatMessageString>>,
        /// Values of relevant expressions at the start of the thread flow that remain constant.
        pub immutable_state: Option<IndexMap<String, MultiformatMessageString>>,
        /// A temporally ordered array of 'threadFlowLocation' objects, each of which describes a
        /// location visited by the tool while producing the result.
        pub locations: NodeList<ThreadFlowLocation>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// A location visited by an analysis tool while simulating or monitoring the execution of a program.
    pub struct ThreadFlowLocation {
        /// The index within the run threadFlowLocations array.
        pub index: Sentinel,
        /// The code location.
        pub location: Option<Location>,
        /// The call stack leading to this location.
        pub stack: Option<Stack>,
        /// A set of distinct strings that categorize the thread flow location. Well-known kinds
        /// include 'acquire', 'release', 'enter', 'exit', 'call', 'return', 'branch', 'implicit',
        /// 'false', 'true', 'caution', 'danger', 'unknown', 'unreachable', 'taint', 'function',
        /// 'handler', 'lock', 'memory', 'resource', 'scope' and 'value'.
        pub kinds: Option<Vec<String>>,
        /// An array of references to rule or taxonomy reporting descriptors that are applicable to the thread flow location.
        pub taxa: Option<NodeList<ReportingDescriptorReference>>,
        /// The name of the module that contains the code that is executing.
        pub module: Option<String>,
        /// A dictionary, each of whose keys specifies a variable or expression, the associated
        /// value of which represents the variable or expression value.
        pub state: Option<IndexMap<String, MultiformatMessageString>>,
        /// An integer representing a containment hierarchy within the thread flow.
        pub nesting_level: Option<i64>,
        /// An integer representing the temporal order in which execution reached this location.
        pub execution_order: Sentinel,
        /// The Coordinated Universal Time (UTC) date and time at which this location was executed.
        pub execution_time_utc: Option<DateTime<Utc>>,
        /// Specifies the importance of this location in understanding the code flow in which it occurs.
        pub importance: Option<ThreadFlowLocationImportance>,
        /// A web request associated with this thread flow location.
        pub web_request: Option<WebRequest>,
        /// A web response associated with this thread flow location.
        pub web_response: Option<WebResponse>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// A call stack that is relevant to a result.
    pub struct Stack {
        /// A message relevant to this call stack.
        pub message: Option<Message>,
        /// An array of stack frames that represents a sequence of calls, rendered in reverse
        /// chronological order, that comprise the call stack.
        pub frames: NodeList<StackFrame>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// A function call within a stack trace.
    pub struct StackFrame {
        /// The location to which this stack frame refers.
        pub location: Option<Location>,
        /// The name of the module that contains the code of this stack frame.
        pub module: Option<String>,
        /// The thread identifier of the stack frame.
        pub thread_id: Option<i64>,
        /// The parameters of the call that is executing.
        pub parameters: Option<Vec<String>>,
        pub properties: Option<PropertyBag>,
    }
}

impl CodeFlow {
    /// Creates a code flow with a single thread flow through `locations`.
    pub fn single(locations: impl IntoIterator<Item = ThreadFlowLocation>) -> Self {
        Self {
            thread_flows: NodeList::from([ThreadFlow {
                locations: locations.into_iter().collect(),
                ..Default::default()
            }]),
            ..Default::default()
        }
    }
}

impl ThreadFlowLocation {
    /// Returns the location's importance, defaulting to [`ThreadFlowLocationImportance::Important`].
    pub fn effective_importance(&self) -> ThreadFlowLocationImportance {
        self.importance
            .unwrap_or(ThreadFlowLocationImportance::Important)
    }
}
