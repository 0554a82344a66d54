pub mod class;
pub mod school_settings;
pub mod student;
pub mod student_attendance;
pub mod teacher;
pub mod teacher_attendance;

pub use class::Entity as ClassEntity;
pub use school_settings::Entity as SchoolSettingsEntity;
pub use student::Entity as StudentEntity;
pub use student_attendance::Entity as StudentAttendanceEntity;
pub use teacher::Entity as TeacherEntity;
pub use teacher_attendance::Entity as TeacherAttendanceEntity;
