// src/admin/registry.rs

use super::{AdminModel, Autocomplete, FilterKind, FormField, InlineModel, ListFilter, Widget};

const STAFF_AUTOCOMPLETE: Autocomplete = Autocomplete {
    field: "staffMemberId",
    source: "/admin/autocomplete/plantonistas",
};

const USER_AUTOCOMPLETE: Autocomplete = Autocomplete {
    field: "userId",
    source: "/admin/autocomplete/usuarios",
};

const STAFF_MEMBER_FIELD: FormField = FormField {
    name: "staffMemberId",
    label: "Plantonista",
    widget: Widget::Autocomplete,
    required: true,
    max_length: None,
    help_text: None,
};

inventory::submit! {
    AdminModel {
        slug: "secretarias",
        verbose_name: "Secretaria",
        verbose_name_plural: "Secretarias",
        ordering: "name",
        list_display: &["name", "rosterActive"],
        search_fields: &["name"],
        list_filter: &[ListFilter { field: "rosterActive", kind: FilterKind::Boolean }],
        autocomplete_fields: &[],
        inlines: &[],
        form_fields: &[
            FormField {
                name: "name",
                label: "Nome da Secretaria",
                widget: Widget::Text,
                required: true,
                max_length: Some(200),
                help_text: None,
            },
            FormField {
                name: "rosterActive",
                label: "Escala Ativa",
                widget: Widget::Checkbox,
                required: false,
                max_length: None,
                help_text: None,
            },
        ],
    }
}

inventory::submit! {
    AdminModel {
        slug: "plantonistas",
        verbose_name: "Plantonista",
        verbose_name_plural: "Plantonistas",
        ordering: "fullName",
        list_display: &["fullName", "departmentName", "phones"],
        search_fields: &["fullName", "department.name"],
        list_filter: &[ListFilter {
            field: "departmentId",
            kind: FilterKind::ForeignKey { related: "secretarias" },
        }],
        autocomplete_fields: &[USER_AUTOCOMPLETE],
        inlines: &[],
        form_fields: &[
            FormField {
                name: "departmentId",
                label: "Secretaria",
                widget: Widget::Select,
                required: true,
                max_length: None,
                help_text: None,
            },
            FormField {
                name: "userId",
                label: "Usuário do Sistema",
                widget: Widget::Autocomplete,
                required: false,
                max_length: None,
                help_text: None,
            },
            FormField {
                name: "fullName",
                label: "Nome Completo",
                widget: Widget::Text,
                required: true,
                max_length: Some(255),
                help_text: None,
            },
            FormField {
                name: "phones",
                label: "Telefone(s)",
                widget: Widget::Text,
                required: true,
                max_length: Some(100),
                help_text: Some("Separe os números por vírgula. Ex: (11) 99999-8888, (11) 4798-0000"),
            },
        ],
    }
}

inventory::submit! {
    AdminModel {
        slug: "periodos",
        verbose_name: "Período de Plantão",
        verbose_name_plural: "Períodos de Plantão",
        ordering: "-startsAt",
        list_display: &["description", "startsAt", "endsAt"],
        search_fields: &["description"],
        list_filter: &[ListFilter { field: "startsAt", kind: FilterKind::Date }],
        autocomplete_fields: &[],
        inlines: &[InlineModel {
            slug: "escalas",
            field: "assignments",
            verbose_name_plural: "Escalas",
            extra: 1,
            fields: &[STAFF_MEMBER_FIELD],
            autocomplete_fields: &[STAFF_AUTOCOMPLETE],
        }],
        form_fields: &[
            FormField {
                name: "description",
                label: "Descrição",
                widget: Widget::Text,
                required: true,
                max_length: Some(150),
                help_text: Some("Ex: Final de Semana de Carnaval"),
            },
            FormField {
                name: "startsAt",
                label: "Data de Início",
                widget: Widget::DateTime,
                required: true,
                max_length: None,
                help_text: None,
            },
            FormField {
                name: "endsAt",
                label: "Data de Fim",
                widget: Widget::DateTime,
                required: true,
                max_length: None,
                help_text: None,
            },
        ],
    }
}

inventory::submit! {
    AdminModel {
        slug: "escalas",
        verbose_name: "Escala",
        verbose_name_plural: "Escalas",
        ordering: "-period.startsAt",
        list_display: &["staffMemberName", "periodDescription", "createdAt"],
        search_fields: &[],
        list_filter: &[
            ListFilter { field: "periodId", kind: FilterKind::ForeignKey { related: "periodos" } },
            ListFilter { field: "staffMemberId", kind: FilterKind::ForeignKey { related: "plantonistas" } },
        ],
        autocomplete_fields: &[STAFF_AUTOCOMPLETE],
        inlines: &[],
        form_fields: &[
            STAFF_MEMBER_FIELD,
            FormField {
                name: "periodId",
                label: "Período",
                widget: Widget::Select,
                required: true,
                max_length: None,
                help_text: None,
            },
        ],
    }
}

inventory::submit! {
    AdminModel {
        slug: "contatos",
        verbose_name: "Contato Emergencial",
        verbose_name_plural: "Contatos Emergenciais",
        ordering: "organization",
        list_display: &["organization", "phones"],
        search_fields: &["organization"],
        list_filter: &[],
        autocomplete_fields: &[],
        inlines: &[],
        form_fields: &[
            FormField {
                name: "organization",
                label: "Órgão",
                widget: Widget::Text,
                required: true,
                max_length: Some(150),
                help_text: None,
            },
            FormField {
                name: "phones",
                label: "Telefone(s) de Contato",
                widget: Widget::Text,
                required: true,
                max_length: Some(200),
                help_text: Some("Separe os números por vírgula."),
            },
            FormField {
                name: "notes",
                label: "Observação",
                widget: Widget::TextArea,
                required: false,
                max_length: None,
                help_text: None,
            },
        ],
    }
}
