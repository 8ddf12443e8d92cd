//! Spanish input keys accepted for each canonical field name.
//!
//! Producers export rows with the column names of the regulator's forms, so
//! both spellings are read.

/// Alternative keys for `field`, in lookup order.
pub fn aliases(field: &str) -> &'static [&'static str] {
    match field {
        "period" => &["periodo"],
        "ipress_code" => &["codigo_ipress"],
        "ugipress_code" => &["codigo_ugipress"],
        "ups_code" => &["codigo_ups"],
        "age_group" => &["grupo_edad"],
        "gender" => &["sexo"],
        "total_patients" => &["total_pacientes"],
        "total_appointments" => &["total_atenciones"],
        "poverty_level" => &["nivel_pobreza"],
        "funding_source" => &["fuente_financiamiento"],
        "priority" => &["prioridad"],
        "destination" => &["destino"],
        "exit_type" => &["tipo_egreso"],
        "stay_days" => &["dias_estancia"],
        "icd10_code" => &["codigo_cie10", "cie10"],
        "diagnosis_type" => &["tipo_diagnostico"],
        "total_cases" => &["total_casos"],
        "total_deliveries" => &["total_partos"],
        "complicated_deliveries" => &["partos_complicados"],
        "live_births" => &["nacidos_vivos"],
        "still_births" => &["nacidos_muertos"],
        "surveillance_code" => &["codigo_vigilancia"],
        "event_count" => &["total_eventos"],
        "total_procedures" => &["total_procedimientos"],
        "total_interventions" => &["total_intervenciones"],
        "total_referrals" => &["total_referencias"],
        "physical_consulting_rooms" => &["consultorios_fisicos"],
        "functional_consulting_rooms" => &["consultorios_funcionales"],
        "hospital_beds" => &["camas_hospitalarias"],
        "total_physicians" => &["medicos_total"],
        "serums_physicians" => &["medicos_serums"],
        "resident_physicians" => &["medicos_residentes"],
        "nurses" => &["enfermeras"],
        "dentists" => &["odontologos"],
        "psychologists" => &["psicologos"],
        "nutritionists" => &["nutricionistas"],
        "medical_technologists" => &["tecnologos_medicos"],
        "midwives" => &["obstetras"],
        "pharmacists" => &["quimicos_farmaceuticos"],
        "support_staff" => &["auxiliares_asistenciales"],
        "other_professionals" => &["otros_profesionales"],
        "operative_ambulances" => &["ambulancias_operativas"],
        "budget_category" => &["clasificador_gasto", "categoria_presupuestal"],
        "executed_amount" => &["monto_ejecutado"],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_fields() {
        assert_eq!(aliases("period"), &["periodo"]);
        assert_eq!(aliases("operative_ambulances"), &["ambulancias_operativas"]);
        assert!(aliases("unknown").is_empty());
    }
}
