// src/services/disponibilidad.rs
//
// Núcleo puro de la lógica de disponibilidad: solape de intervalos,
// clasificación de ausencias, evaluación de conflictos y derivación del
// estado de una obra. Sin IO; los servicios le pasan las filas ya leídas.

use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    models::asignacion::AsignacionConObra,
    models::obra::{ConteoTareas, EstadoObra},
    models::trabajador::{TipoAusencia, TrabajadorAusencia},
};

// ---
// Solape de intervalos
// ---

/// ¿Se solapan dos rangos de fechas cerrados? Un fin `None` se trata como
/// "sin límite hacia adelante". Semántica inclusiva: coincidir en un solo
/// día ya cuenta como solape.
pub fn se_solapan(
    inicio_a: NaiveDate,
    fin_a: Option<NaiveDate>,
    inicio_b: NaiveDate,
    fin_b: Option<NaiveDate>,
) -> bool {
    let fin_a = fin_a.unwrap_or(NaiveDate::MAX);
    let fin_b = fin_b.unwrap_or(NaiveDate::MAX);
    inicio_a <= fin_b && inicio_b <= fin_a
}

// ---
// Clasificación de ausencias
// ---

/// Bloqueante: el trabajador no está disponible y la asignación se rechaza.
/// Baja: no bloquea, pero la asignación queda pendiente de confirmación
/// (una baja puede terminar en cualquier momento y es práctica habitual
/// asignar por adelantado).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaseAusencia {
    Bloqueante,
    Baja,
}

pub fn clasificar(tipo: TipoAusencia) -> ClaseAusencia {
    match tipo {
        TipoAusencia::Vacaciones | TipoAusencia::Permiso | TipoAusencia::Otro => {
            ClaseAusencia::Bloqueante
        }
        TipoAusencia::BajaEnfermedad | TipoAusencia::BajaAccidente => ClaseAusencia::Baja,
    }
}

fn nombre_tipo(tipo: TipoAusencia) -> &'static str {
    match tipo {
        TipoAusencia::Vacaciones => "vacaciones",
        TipoAusencia::BajaEnfermedad => "baja por enfermedad",
        TipoAusencia::BajaAccidente => "baja por accidente",
        TipoAusencia::Permiso => "permiso",
        TipoAusencia::Otro => "otra ausencia",
    }
}

fn formatear_periodo(inicio: NaiveDate, fin: Option<NaiveDate>) -> String {
    match fin {
        Some(fin) => format!("del {} al {}", inicio, fin),
        None => format!("desde el {}", inicio),
    }
}

// ---
// Evaluación de una asignación candidata
// ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluacionAsignacion {
    pub pendiente_confirmacion: bool,
    /// Solapes con otras obras: no impiden crear, solo se avisa.
    pub advertencia: Option<String>,
}

/// Decide si un trabajador puede asignarse en `[fecha_inicio, fecha_fin]`.
/// `otras_asignaciones` son sus asignaciones en obras distintas a la
/// candidata (la consulta ya las filtra).
pub fn evaluar_asignacion(
    ausencias: &[TrabajadorAusencia],
    otras_asignaciones: &[AsignacionConObra],
    fecha_inicio: NaiveDate,
    fecha_fin: NaiveDate,
) -> Result<EvaluacionAsignacion, AppError> {
    let solapadas: Vec<&TrabajadorAusencia> = ausencias
        .iter()
        .filter(|a| se_solapan(a.fecha_inicio, a.fecha_fin, fecha_inicio, Some(fecha_fin)))
        .collect();

    let bloqueantes: Vec<&&TrabajadorAusencia> = solapadas
        .iter()
        .filter(|a| clasificar(a.tipo) == ClaseAusencia::Bloqueante)
        .collect();

    if !bloqueantes.is_empty() {
        let lista = bloqueantes
            .iter()
            .map(|a| format!("{} {}", nombre_tipo(a.tipo), formatear_periodo(a.fecha_inicio, a.fecha_fin)))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(AppError::ConflictoDisponibilidad(format!(
            "No se puede asignar: el trabajador tiene {} en el periodo solicitado.",
            lista
        )));
    }

    let pendiente_confirmacion = solapadas
        .iter()
        .any(|a| clasificar(a.tipo) == ClaseAusencia::Baja);

    let obras_en_conflicto = {
        let mut nombres: Vec<&str> = otras_asignaciones
            .iter()
            .filter(|a| se_solapan(a.fecha_inicio, a.fecha_fin, fecha_inicio, Some(fecha_fin)))
            .map(|a| a.obra_nombre.as_str())
            .collect();
        nombres.sort_unstable();
        nombres.dedup();
        nombres
    };

    let advertencia = if obras_en_conflicto.is_empty() {
        None
    } else {
        Some(format!(
            "El trabajador ya está asignado a {} en fechas que se solapan.",
            obras_en_conflicto.join(", ")
        ))
    };

    Ok(EvaluacionAsignacion {
        pendiente_confirmacion,
        advertencia,
    })
}

// ---
// Evaluación de una ausencia candidata (regla simétrica)
// ---

/// Una ausencia bloqueante que pisa asignaciones existentes se rechaza: hay
/// que reprogramarlas primero. Una baja no se rechaza nunca; devuelve las
/// asignaciones vigentes o futuras respecto al inicio de la baja, que el
/// servicio marcará como pendientes de confirmación.
pub fn evaluar_ausencia(
    tipo: TipoAusencia,
    asignaciones: &[AsignacionConObra],
    fecha_inicio: NaiveDate,
    fecha_fin: Option<NaiveDate>,
) -> Result<Vec<AsignacionConObra>, AppError> {
    match clasificar(tipo) {
        ClaseAusencia::Bloqueante => {
            let obras_en_conflicto = {
                let mut nombres: Vec<&str> = asignaciones
                    .iter()
                    .filter(|a| se_solapan(a.fecha_inicio, a.fecha_fin, fecha_inicio, fecha_fin))
                    .map(|a| a.obra_nombre.as_str())
                    .collect();
                nombres.sort_unstable();
                nombres.dedup();
                nombres
            };

            if !obras_en_conflicto.is_empty() {
                return Err(AppError::ConflictoDisponibilidad(format!(
                    "No se puede registrar la ausencia: el trabajador está asignado a {} en ese periodo. Reprograma o elimina esas asignaciones primero.",
                    obras_en_conflicto.join(", ")
                )));
            }
            Ok(Vec::new())
        }
        ClaseAusencia::Baja => {
            // Vigente o futura: fin sin fecha, o fin >= inicio de la baja.
            let afectadas = asignaciones
                .iter()
                .filter(|a| a.fecha_fin.is_none_or(|fin| fin >= fecha_inicio))
                .cloned()
                .collect();
            Ok(afectadas)
        }
    }
}

// ---
// Alta de una baja
// ---

/// ¿Este parche constituye un "alta"? Solo cuando pone fecha de fin a una
/// baja que estaba abierta. El alta auto-confirma en bloque todas las
/// asignaciones pendientes del trabajador, sin re-comprobar fechas.
pub fn es_alta(
    tipo_actual: TipoAusencia,
    fin_actual: Option<NaiveDate>,
    fin_nuevo: Option<NaiveDate>,
) -> bool {
    clasificar(tipo_actual) == ClaseAusencia::Baja && fin_actual.is_none() && fin_nuevo.is_some()
}

// ---
// Derivación del estado de una obra
// ---

/// Estado visible de la obra a partir del agregado de sus tareas. El cierre
/// manual lo fija a FINALIZADA y deja de calcularse.
pub fn derivar_estado(cerrada_manualmente: bool, conteo: &ConteoTareas) -> EstadoObra {
    if cerrada_manualmente {
        return EstadoObra::Finalizada;
    }
    if conteo.total == 0 {
        return EstadoObra::SinIniciar;
    }
    if conteo.hechas == conteo.total {
        return EstadoObra::ListaParaCerrar;
    }
    if conteo.en_curso > 0 || conteo.hechas > 0 {
        return EstadoObra::EnCurso;
    }
    // Todas pendientes
    EstadoObra::SinIniciar
}

/// Variante sobre la lista de tareas ya cargada (detalle de obra).
pub fn derivar_estado_de_tareas(
    cerrada_manualmente: bool,
    tareas: &[crate::models::tarea::Tarea],
) -> EstadoObra {
    use crate::models::tarea::EstadoTarea;

    let conteo = ConteoTareas {
        total: tareas.len() as i64,
        hechas: tareas.iter().filter(|t| t.estado == EstadoTarea::Hecha).count() as i64,
        en_curso: tareas.iter().filter(|t| t.estado == EstadoTarea::EnCurso).count() as i64,
    };
    derivar_estado(cerrada_manualmente, &conteo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn fecha(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ausencia(tipo: TipoAusencia, inicio: &str, fin: Option<&str>) -> TrabajadorAusencia {
        TrabajadorAusencia {
            id: Uuid::new_v4(),
            trabajador_id: Uuid::new_v4(),
            tipo,
            fecha_inicio: fecha(inicio),
            fecha_fin: fin.map(fecha),
            notas: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn asignacion(obra: &str, inicio: &str, fin: Option<&str>) -> AsignacionConObra {
        AsignacionConObra {
            id: Uuid::new_v4(),
            obra_id: Uuid::new_v4(),
            obra_nombre: obra.to_string(),
            trabajador_id: Uuid::new_v4(),
            fecha_inicio: fecha(inicio),
            fecha_fin: fin.map(fecha),
            notas: None,
            pendiente_confirmacion: false,
        }
    }

    // --- se_solapan ---

    #[test]
    fn solape_es_simetrico() {
        let casos = [
            ("2024-01-01", Some("2024-01-31"), "2024-01-15", Some("2024-02-01")),
            ("2024-01-01", Some("2024-01-31"), "2024-02-01", Some("2024-02-28")),
            ("2024-01-01", None, "2023-12-01", Some("2023-12-31")),
            ("2024-05-10", Some("2024-05-10"), "2024-05-10", Some("2024-05-10")),
        ];
        for (ia, fa, ib, fb) in casos {
            let a = (fecha(ia), fa.map(fecha));
            let b = (fecha(ib), fb.map(fecha));
            assert_eq!(
                se_solapan(a.0, a.1, b.0, b.1),
                se_solapan(b.0, b.1, a.0, a.1),
                "simetría rota para {:?} / {:?}",
                a,
                b
            );
        }
    }

    #[test]
    fn un_intervalo_se_solapa_consigo_mismo() {
        let inicio = fecha("2024-03-01");
        assert!(se_solapan(inicio, Some(fecha("2024-03-15")), inicio, Some(fecha("2024-03-15"))));
        assert!(se_solapan(inicio, None, inicio, None));
    }

    #[test]
    fn mismo_dia_cuenta_como_solape() {
        // Semántica inclusiva: el fin de uno coincide con el inicio del otro.
        assert!(se_solapan(
            fecha("2024-01-01"),
            Some(fecha("2024-01-10")),
            fecha("2024-01-10"),
            Some(fecha("2024-01-20")),
        ));
    }

    #[test]
    fn intervalos_disjuntos_no_se_solapan() {
        assert!(!se_solapan(
            fecha("2024-01-01"),
            Some(fecha("2024-01-10")),
            fecha("2024-01-11"),
            Some(fecha("2024-01-20")),
        ));
    }

    #[test]
    fn fin_abierto_se_extiende_hacia_adelante() {
        // Abierta desde agosto: pisa cualquier rango posterior...
        assert!(se_solapan(
            fecha("2024-08-01"),
            None,
            fecha("2025-06-01"),
            Some(fecha("2025-06-30")),
        ));
        // ...pero no uno que termina antes de su inicio.
        assert!(!se_solapan(
            fecha("2024-08-01"),
            None,
            fecha("2024-07-01"),
            Some(fecha("2024-07-31")),
        ));
    }

    // --- clasificar ---

    #[test]
    fn clasificacion_de_tipos() {
        assert_eq!(clasificar(TipoAusencia::Vacaciones), ClaseAusencia::Bloqueante);
        assert_eq!(clasificar(TipoAusencia::Permiso), ClaseAusencia::Bloqueante);
        assert_eq!(clasificar(TipoAusencia::Otro), ClaseAusencia::Bloqueante);
        assert_eq!(clasificar(TipoAusencia::BajaEnfermedad), ClaseAusencia::Baja);
        assert_eq!(clasificar(TipoAusencia::BajaAccidente), ClaseAusencia::Baja);
    }

    // --- evaluar_asignacion ---

    #[test]
    fn vacaciones_bloquean_la_asignacion() {
        let ausencias = vec![ausencia(
            TipoAusencia::Vacaciones,
            "2024-08-01",
            Some("2024-08-15"),
        )];

        let resultado =
            evaluar_asignacion(&ausencias, &[], fecha("2024-08-10"), fecha("2024-08-20"));

        match resultado {
            Err(AppError::ConflictoDisponibilidad(msg)) => {
                assert!(msg.contains("vacaciones"), "mensaje: {}", msg);
                assert!(msg.contains("2024-08-01"), "mensaje: {}", msg);
            }
            otro => panic!("se esperaba conflicto bloqueante, fue {:?}", otro.map(|_| ())),
        }
    }

    #[test]
    fn baja_abierta_deja_pasar_pero_pendiente() {
        let ausencias = vec![ausencia(TipoAusencia::BajaEnfermedad, "2024-08-01", None)];

        let eval = evaluar_asignacion(&ausencias, &[], fecha("2024-08-05"), fecha("2024-08-10"))
            .expect("una baja no debe bloquear");

        assert!(eval.pendiente_confirmacion);
        assert!(eval.advertencia.is_none());
    }

    #[test]
    fn bloqueante_gana_a_la_baja_si_coinciden() {
        let ausencias = vec![
            ausencia(TipoAusencia::BajaEnfermedad, "2024-08-01", None),
            ausencia(TipoAusencia::Permiso, "2024-08-08", Some("2024-08-09")),
        ];

        let resultado =
            evaluar_asignacion(&ausencias, &[], fecha("2024-08-05"), fecha("2024-08-10"));

        assert!(matches!(resultado, Err(AppError::ConflictoDisponibilidad(_))));
    }

    #[test]
    fn ausencia_fuera_del_rango_no_afecta() {
        let ausencias = vec![ausencia(
            TipoAusencia::Vacaciones,
            "2024-07-01",
            Some("2024-07-15"),
        )];

        let eval = evaluar_asignacion(&ausencias, &[], fecha("2024-08-01"), fecha("2024-08-10"))
            .expect("sin solape no hay conflicto");

        assert!(!eval.pendiente_confirmacion);
        assert!(eval.advertencia.is_none());
    }

    #[test]
    fn solape_con_otra_obra_avisa_sin_bloquear() {
        let otras = vec![asignacion("Reforma Plaza Mayor", "2024-01-01", Some("2024-01-31"))];

        let eval = evaluar_asignacion(&[], &otras, fecha("2024-01-15"), fecha("2024-02-01"))
            .expect("el solape entre obras no bloquea");

        let advertencia = eval.advertencia.expect("debe avisar del solape");
        assert!(advertencia.contains("Reforma Plaza Mayor"), "advertencia: {}", advertencia);
        assert!(!eval.pendiente_confirmacion);
    }

    #[test]
    fn advertencia_no_repite_obras() {
        let otras = vec![
            asignacion("Nave Industrial", "2024-01-01", Some("2024-01-10")),
            asignacion("Nave Industrial", "2024-01-12", Some("2024-01-20")),
        ];

        let eval = evaluar_asignacion(&[], &otras, fecha("2024-01-05"), fecha("2024-01-15"))
            .expect("no bloquea");

        let advertencia = eval.advertencia.unwrap();
        assert_eq!(advertencia.matches("Nave Industrial").count(), 1);
    }

    // --- evaluar_ausencia ---

    #[test]
    fn ausencia_bloqueante_rechazada_si_pisa_asignaciones() {
        let asignaciones = vec![asignacion("Edificio Norte", "2024-08-05", Some("2024-08-25"))];

        let resultado = evaluar_ausencia(
            TipoAusencia::Vacaciones,
            &asignaciones,
            fecha("2024-08-01"),
            Some(fecha("2024-08-15")),
        );

        match resultado {
            Err(AppError::ConflictoDisponibilidad(msg)) => {
                assert!(msg.contains("Edificio Norte"), "mensaje: {}", msg);
            }
            otro => panic!("se esperaba conflicto, fue {:?}", otro.map(|_| ())),
        }
    }

    #[test]
    fn ausencia_bloqueante_sin_solape_pasa_limpia() {
        let asignaciones = vec![asignacion("Edificio Norte", "2024-09-01", Some("2024-09-30"))];

        let afectadas = evaluar_ausencia(
            TipoAusencia::Permiso,
            &asignaciones,
            fecha("2024-08-01"),
            Some(fecha("2024-08-05")),
        )
        .expect("sin solape no hay conflicto");

        assert!(afectadas.is_empty());
    }

    #[test]
    fn baja_marca_asignaciones_vigentes_y_futuras() {
        let asignaciones = vec![
            // Terminó antes del inicio de la baja: no se toca.
            asignacion("Obra Pasada", "2024-06-01", Some("2024-07-15")),
            // Vigente durante la baja.
            asignacion("Obra Vigente", "2024-07-20", Some("2024-08-10")),
            // Empieza después: también queda pendiente.
            asignacion("Obra Futura", "2024-09-01", Some("2024-09-30")),
            // Sin fecha de fin: vigente por definición.
            asignacion("Obra Abierta", "2024-07-01", None),
        ];

        let afectadas = evaluar_ausencia(
            TipoAusencia::BajaAccidente,
            &asignaciones,
            fecha("2024-08-01"),
            None,
        )
        .expect("una baja nunca se rechaza");

        let nombres: Vec<&str> = afectadas.iter().map(|a| a.obra_nombre.as_str()).collect();
        assert_eq!(nombres, vec!["Obra Vigente", "Obra Futura", "Obra Abierta"]);
    }

    // --- es_alta ---

    #[test]
    fn cerrar_una_baja_abierta_es_alta() {
        assert!(es_alta(TipoAusencia::BajaEnfermedad, None, Some(fecha("2024-08-20"))));
        assert!(es_alta(TipoAusencia::BajaAccidente, None, Some(fecha("2024-08-20"))));
    }

    #[test]
    fn no_hay_alta_sin_cierre_ni_sobre_bloqueantes() {
        // La baja ya tenía fin: ajustarlo no es un alta.
        assert!(!es_alta(
            TipoAusencia::BajaEnfermedad,
            Some(fecha("2024-08-10")),
            Some(fecha("2024-08-20")),
        ));
        // El parche no toca la fecha de fin.
        assert!(!es_alta(TipoAusencia::BajaEnfermedad, None, None));
        // Cerrar unas vacaciones abiertas no confirma nada.
        assert!(!es_alta(TipoAusencia::Vacaciones, None, Some(fecha("2024-08-20"))));
    }

    // --- derivar_estado ---

    fn conteo(total: i64, hechas: i64, en_curso: i64) -> ConteoTareas {
        ConteoTareas { total, hechas, en_curso }
    }

    #[test]
    fn obra_sin_tareas_esta_sin_iniciar() {
        assert_eq!(derivar_estado(false, &conteo(0, 0, 0)), EstadoObra::SinIniciar);
    }

    #[test]
    fn todas_pendientes_sigue_sin_iniciar() {
        assert_eq!(derivar_estado(false, &conteo(3, 0, 0)), EstadoObra::SinIniciar);
    }

    #[test]
    fn mezcla_de_estados_es_en_curso() {
        // 2 hechas + 1 en curso
        assert_eq!(derivar_estado(false, &conteo(3, 2, 1)), EstadoObra::EnCurso);
        // hechas + pendientes, sin ninguna en curso: también en curso
        assert_eq!(derivar_estado(false, &conteo(3, 2, 0)), EstadoObra::EnCurso);
        // solo una en curso
        assert_eq!(derivar_estado(false, &conteo(3, 0, 1)), EstadoObra::EnCurso);
    }

    #[test]
    fn todas_hechas_lista_para_cerrar() {
        assert_eq!(derivar_estado(false, &conteo(3, 3, 0)), EstadoObra::ListaParaCerrar);
    }

    #[test]
    fn cierre_manual_fija_finalizada() {
        // Aunque una tarea se reabra después del cierre, el estado no cambia.
        assert_eq!(derivar_estado(true, &conteo(3, 2, 1)), EstadoObra::Finalizada);
        assert_eq!(derivar_estado(true, &conteo(0, 0, 0)), EstadoObra::Finalizada);
    }
}
