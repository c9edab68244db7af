//! Industry jobs.
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{constants::JobStatus, Element, Result};

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlueprintType {
    Original,
    Copy,
}

/// The blueprint (or other item) installed into the job.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobInput {
    pub id: i64,
    pub blueprint_type: BlueprintType,
    pub location_id: i64,
    pub quantity: i64,
    pub prod_level: i64,
    pub mat_level: i64,
    pub runs_left: i64,
    pub item_flag: i64,
    pub type_id: i64,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobOutput {
    pub location_id: i64,
    pub bpc_runs: i64,
    pub container_location_id: i64,
    pub type_id: i64,
    pub flag: i64,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobMultipliers {
    pub material: f64,
    pub char_material: f64,
    pub time: f64,
    pub char_time: f64,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryJob {
    pub id: i64,
    pub line_id: i64,
    pub container_id: i64,
    pub input: JobInput,
    pub output: JobOutput,
    pub runs: i64,
    pub installer_id: i64,
    pub system_id: i64,
    pub multipliers: JobMultipliers,
    pub container_type_id: i64,
    /// The job's output has been delivered.
    pub delivered: bool,
    pub finished: bool,
    pub status: JobStatus,
    pub activity_id: i64,
    pub install_ts: DateTime<Utc>,
    pub begin_ts: Option<DateTime<Utc>>,
    pub end_ts: Option<DateTime<Utc>>,
    pub pause_ts: Option<DateTime<Utc>>,
}

/// Parse industry jobs keyed by job id.
pub fn parse_industry_jobs(result: &Element) -> Result<HashMap<i64, IndustryJob>> {
    let mut jobs = HashMap::new();
    for row in result.rowset()?.rows() {
        let job = parse_job(row)?;
        jobs.insert(job.id, job);
    }
    Ok(jobs)
}

fn parse_job(row: &Element) -> Result<IndustryJob> {
    let blueprint_type = if row.attr_flag("installedItemCopy")? {
        BlueprintType::Copy
    } else {
        BlueprintType::Original
    };

    Ok(IndustryJob {
        id: row.attr_i64("jobID")?,
        line_id: row.attr_i64("assemblyLineID")?,
        container_id: row.attr_i64("containerID")?,
        input: JobInput {
            id: row.attr_i64("installedItemID")?,
            blueprint_type,
            location_id: row.attr_i64("installedItemLocationID")?,
            quantity: row.attr_i64("installedItemQuantity")?,
            prod_level: row.attr_i64("installedItemProductivityLevel")?,
            mat_level: row.attr_i64("installedItemMaterialLevel")?,
            runs_left: row.attr_i64("installedItemLicensedProductionRunsRemaining")?,
            item_flag: row.attr_i64("installedItemFlag")?,
            type_id: row.attr_i64("installedItemTypeID")?,
        },
        output: JobOutput {
            location_id: row.attr_i64("outputLocationID")?,
            bpc_runs: row.attr_i64("licensedProductionRuns")?,
            container_location_id: row.attr_i64("containerLocationID")?,
            type_id: row.attr_i64("outputTypeID")?,
            flag: row.attr_i64("outputFlag")?,
        },
        runs: row.attr_i64("runs")?,
        installer_id: row.attr_i64("installerID")?,
        system_id: row.attr_i64("installedInSolarSystemID")?,
        multipliers: JobMultipliers {
            material: row.attr_f64("materialMultiplier")?,
            char_material: row.attr_f64("charMaterialMultiplier")?,
            time: row.attr_f64("timeMultiplier")?,
            char_time: row.attr_f64("charTimeMultiplier")?,
        },
        container_type_id: row.attr_i64("containerTypeID")?,
        delivered: row.attr_flag("completed")?,
        finished: row.attr_flag("completedSuccessfully")?,
        status: JobStatus::from_code(row.attr_i64("completedStatus")?)?,
        activity_id: row.attr_i64("activityID")?,
        install_ts: row.attr_ts("installTime")?,
        begin_ts: row.attr_opt_ts("beginProductionTime")?,
        end_ts: row.attr_opt_ts("endProductionTime")?,
        pause_ts: row.attr_opt_ts("pauseProductionTime")?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::{constants::JobStatus, Element, Error};

    use super::{parse_industry_jobs, BlueprintType};

    const JOB_ROW: &str = r#"jobID="19962573" assemblyLineID="100502936" containerID="60006382" installedItemID="1001607664121" installedItemLocationID="60006382" installedItemQuantity="1" installedItemProductivityLevel="0" installedItemMaterialLevel="0" installedItemLicensedProductionRunsRemaining="-1" outputLocationID="60006382" installerID="975676271" runs="2" licensedProductionRuns="0" installedInSolarSystemID="30000163" containerLocationID="30000163" materialMultiplier="1" charMaterialMultiplier="1.25" timeMultiplier="1" charTimeMultiplier="0.95" installedItemTypeID="1021" outputTypeID="1021" containerTypeID="1930" installedItemCopy="0" completed="1" completedSuccessfully="1" installedItemFlag="4" outputFlag="4" activityID="4" completedStatus="1" installTime="2009-07-26 22:15:35" beginProductionTime="2009-07-26 22:19:00" endProductionTime="2009-07-26 23:17:53" pauseProductionTime="0001-01-01 00:00:00""#;

    #[test]
    fn parses_jobs() {
        let result =
            Element::parse(&format!("<result><rowset><row {JOB_ROW} /></rowset></result>"))
                .unwrap();
        let jobs = parse_industry_jobs(&result).unwrap();
        let job = &jobs[&19962573];

        assert_eq!(job.line_id, 100502936);
        assert_eq!(job.input.blueprint_type, BlueprintType::Original);
        assert_eq!(job.input.runs_left, -1);
        assert_eq!(job.output.container_location_id, 30000163);
        assert_eq!(job.multipliers.char_material, 1.25);
        assert_eq!(job.multipliers.char_time, 0.95);
        assert!(job.delivered);
        assert!(job.finished);
        assert_eq!(job.status, JobStatus::Delivered);
        assert_eq!(
            job.install_ts,
            Utc.with_ymd_and_hms(2009, 7, 26, 22, 15, 35).unwrap()
        );
        assert_eq!(
            job.end_ts,
            Some(Utc.with_ymd_and_hms(2009, 7, 26, 23, 17, 53).unwrap())
        );
    }

    #[test]
    fn unknown_status_is_an_error() {
        let row = JOB_ROW.replace(r#"completedStatus="1""#, r#"completedStatus="9""#);
        let result =
            Element::parse(&format!("<result><rowset><row {row} /></rowset></result>")).unwrap();
        assert!(matches!(
            parse_industry_jobs(&result),
            Err(Error::UnknownEnumValue { value: 9, .. })
        ));
    }
}
