use super::{FieldType, NodeSchema, SchemaRegistry};

const CLIENT_STATUSES: &[&str] = &["LEAD", "ACTIVE", "INACTIVE", "ARCHIVED"];
const PRIORITIES: &[&str] = &["LOW", "MEDIUM", "HIGH", "URGENT"];
const DURATION_UNITS: &[&str] = &["MINUTES", "HOURS", "DAYS"];

/// Registers the built-in trigger and action catalogue.
pub(super) fn register_default_schemas(registry: &mut SchemaRegistry) {
    // Triggers
    registry.register(NodeSchema::trigger("CLIENT_CREATED", "Client created"));
    registry.register(
        NodeSchema::trigger("CLIENT_UPDATED", "Client updated")
            .optional("field", "Changed field", FieldType::String),
    );
    registry.register(
        NodeSchema::trigger("CLIENT_STATUS_CHANGED", "Client status changed")
            .optional("fromStatus", "From status", FieldType::one_of(CLIENT_STATUSES))
            .required("toStatus", "To status", FieldType::one_of(CLIENT_STATUSES)),
    );
    registry.register(NodeSchema::trigger("TASK_CREATED", "Task created"));
    registry.register(NodeSchema::trigger("TASK_COMPLETED", "Task completed"));
    registry.register(
        NodeSchema::trigger("TASK_OVERDUE", "Task overdue")
            .optional("graceHours", "Grace period (hours)", FieldType::Number),
    );
    registry.register(
        NodeSchema::trigger("APPOINTMENT_SCHEDULED", "Appointment scheduled")
            .optional("calendarId", "Calendar", FieldType::reference("calendar")),
    );
    registry.register(
        NodeSchema::trigger("FORM_SUBMITTED", "Form submitted")
            .required("formId", "Form", FieldType::reference("form")),
    );
    registry.register(
        NodeSchema::trigger("SCHEDULED", "On a schedule")
            .required("cron", "Cron expression", FieldType::String)
            .optional("timezone", "Timezone", FieldType::String),
    );
    registry.register(NodeSchema::trigger("MANUAL", "Run manually"));
    registry.register(
        NodeSchema::trigger("WEBHOOK_RECEIVED", "Webhook received")
            .optional("secret", "Signing secret", FieldType::String),
    );

    // Actions
    registry.register(
        NodeSchema::action("SEND_EMAIL", "Send email")
            .optional("templateId", "Template", FieldType::reference("template"))
            .required_unless("subject", "Subject", FieldType::String, "templateId")
            .required_unless("body", "Body", FieldType::String, "templateId")
            .optional("to", "Recipient override", FieldType::String),
    );
    registry.register(
        NodeSchema::action("SEND_SMS", "Send SMS")
            .required("message", "Message", FieldType::String)
            .optional("to", "Recipient override", FieldType::String),
    );
    registry.register(
        NodeSchema::action("CREATE_TASK", "Create task")
            .required("title", "Title", FieldType::String)
            .optional("description", "Description", FieldType::String)
            .optional("priority", "Priority", FieldType::one_of(PRIORITIES))
            .optional("dueInDays", "Due in (days)", FieldType::Number)
            .optional("assigneeId", "Assignee", FieldType::reference("user")),
    );
    registry.register(
        NodeSchema::action("UPDATE_CLIENT", "Update client")
            .required("field", "Field", FieldType::String)
            .required("value", "New value", FieldType::String),
    );
    registry.register(
        NodeSchema::action("ADD_TAG", "Add tag").required("tagId", "Tag", FieldType::reference("tag")),
    );
    registry.register(
        NodeSchema::action("REMOVE_TAG", "Remove tag")
            .required("tagId", "Tag", FieldType::reference("tag")),
    );
    registry.register(
        NodeSchema::action("ASSIGN_USER", "Assign user")
            .required("userId", "User", FieldType::reference("user")),
    );
    registry.register(
        NodeSchema::action("CREATE_NOTIFICATION", "Create notification")
            .required("message", "Message", FieldType::String)
            .optional("userId", "Recipient", FieldType::reference("user")),
    );
    registry.register(
        NodeSchema::action("SEND_WEBHOOK", "Send webhook")
            .required("url", "URL", FieldType::String)
            .optional("method", "Method", FieldType::one_of(&["POST", "PUT", "PATCH"])),
    );
    registry.register(
        NodeSchema::action("WAIT", "Wait")
            .required("duration", "Duration", FieldType::Number)
            .required("unit", "Unit", FieldType::one_of(DURATION_UNITS)),
    );
}
